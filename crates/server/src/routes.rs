use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use seedfin_core::error::{ApiError, Envelope};
use seedfin_metadata::MediaRecord;
use seedfin_parser::{magnet, title};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

/// Header the player page uses to pass a magnet link without URL-encoding it.
pub const MAGNET_HEADER: &str = "x-magnet-link";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/webtorrent/metadata", get(get_metadata))
        .route("/webtorrent/open", get(open_player))
        .route("/webtorrent/files", post(list_files))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct MetadataParams {
    query: Option<String>,
    /// Run the raw release-name cleanup before searching.
    #[serde(default)]
    normalize: bool,
}

async fn get_metadata(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MetadataParams>,
) -> Result<Json<Envelope<MediaRecord>>, AppError> {
    let raw = params.query.unwrap_or_default();
    let query = if params.normalize {
        title::normalize(&raw)
    } else {
        raw.trim().to_string()
    };

    if query.is_empty() {
        return Err(ApiError::BadRequest("Query parameter is required".into()).into());
    }
    debug!(raw = %raw, query = %query, "metadata lookup");

    let record = state.resolver.resolve(&query).await?;
    Ok(Json(Envelope::ok(record)))
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct OpenParams {
    magnet: Option<String>,
}

/// What the player page embeds and hands to the playback client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaybackTarget {
    magnet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    info_hash: Option<String>,
}

async fn open_player(
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<OpenParams>,
) -> Result<Json<Envelope<PlaybackTarget>>, AppError> {
    let from_header = headers
        .get(MAGNET_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let raw = from_header
        .or(params.magnet.filter(|m| !m.is_empty()))
        .unwrap_or_else(|| magnet::DEFAULT_MAGNET.to_string());

    let decoded = magnet::decode(&raw);
    let candidate = magnet::from_info_hash(&decoded).unwrap_or(decoded);

    if !magnet::validate(&candidate) {
        warn!(identifier = %raw, "rejected identifier");
        return Err(ApiError::BadRequest("Invalid magnet link format".into()).into());
    }

    let cleaned = magnet::normalize(&candidate);
    let info_hash = magnet::info_hash(&cleaned).map(str::to_string);

    Ok(Json(Envelope::ok(PlaybackTarget {
        magnet: cleaned,
        info_hash,
    })))
}

/// One file of a loaded torrent, as reported by the playback client.
#[derive(Deserialize)]
struct TorrentFile {
    name: String,
    #[serde(default)]
    length: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilesRequest {
    torrent_name: String,
    files: Vec<TorrentFile>,
}

#[derive(Debug, Serialize)]
struct PlaylistEntry {
    name: String,
    length: u64,
    label: String,
}

#[derive(Debug, Serialize)]
struct Playlist {
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<MediaRecord>,
    files: Vec<PlaylistEntry>,
}

/// Build the playable file list for a torrent: video files only, `.mp4`
/// first, then largest first. Labels come from the resolved record when the
/// torrent name resolves and fall back to the bare file name otherwise.
async fn list_files(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FilesRequest>,
) -> Result<Json<Envelope<Playlist>>, AppError> {
    let mut videos: Vec<TorrentFile> = req
        .files
        .into_iter()
        .filter(|f| title::is_video_file(&f.name))
        .collect();
    if videos.is_empty() {
        return Err(ApiError::NotFound("No video files found in torrent".into()).into());
    }
    videos.sort_by_key(|f| {
        let is_mp4 = f.name.to_lowercase().ends_with(".mp4");
        (!is_mp4, std::cmp::Reverse(f.length))
    });

    let query = title::normalize(&req.torrent_name);
    let metadata = match state.resolver.resolve(&query).await {
        Ok(record) => Some(record),
        Err(e) => {
            info!(torrent = %req.torrent_name, error = %e, "no metadata for torrent");
            None
        }
    };

    let files = videos
        .into_iter()
        .enumerate()
        .map(|(index, f)| {
            let label = match &metadata {
                Some(record) => record.file_label(&f.name, index),
                None => f.name.clone(),
            };
            PlaylistEntry {
                name: f.name,
                length: f.length,
                label,
            }
        })
        .collect();

    Ok(Json(Envelope::ok(Playlist { metadata, files })))
}
