//! Resolved media records.
//!
//! A [`MediaRecord`] is built once per resolution and never mutated. The
//! movie-only and series-only parts live on a private variant, so a record is
//! always exactly one of the two kinds.

use seedfin_core::types::MediaKind;
use serde::Serialize;

use crate::provider::{EpisodeDetail, Genre, MovieDetail, SeriesDetail};

#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    id: u64,
    title: String,
    year: i32,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    genres: Vec<Genre>,
    details: MediaDetails,
}

#[derive(Debug, Clone, PartialEq)]
enum MediaDetails {
    Movie {
        runtime_minutes: u32,
    },
    Series {
        seasons: Vec<SeasonRecord>,
        /// Every season's episodes, season order then episode order.
        episodes_flat: Vec<EpisodeRecord>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    #[serde(rename = "seasonNumber")]
    number: u32,
    name: String,
    episodes: Vec<EpisodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRecord {
    episode_number: u32,
    season_number: u32,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<String>,
    #[serde(rename = "runtime", skip_serializing_if = "Option::is_none")]
    runtime_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    still_path: Option<String>,
}

/// Year from the leading `YYYY` of a catalog date, 0 when absent or malformed.
pub fn extract_year(date: Option<&str>) -> i32 {
    date.and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok())
        .unwrap_or(0)
}

impl MediaRecord {
    pub fn from_movie(detail: MovieDetail) -> Self {
        Self {
            id: detail.id,
            title: detail.title,
            year: extract_year(detail.release_date.as_deref()),
            poster_path: detail.poster_path,
            backdrop_path: detail.backdrop_path,
            overview: detail.overview,
            genres: detail.genres,
            details: MediaDetails::Movie {
                runtime_minutes: detail.runtime_minutes.unwrap_or(0),
            },
        }
    }

    /// Build a series record from its details and the seasons that were
    /// fetched successfully. Season 0 is dropped and seasons are kept in
    /// ascending number order (stable, so catalog order breaks ties).
    pub fn from_series(detail: SeriesDetail, mut seasons: Vec<SeasonRecord>) -> Self {
        seasons.retain(|s| s.number != 0);
        seasons.sort_by_key(|s| s.number);

        let episodes_flat = seasons
            .iter()
            .flat_map(|s| s.episodes.iter().cloned())
            .collect();

        Self {
            id: detail.id,
            title: detail.name,
            year: extract_year(detail.first_air_date.as_deref()),
            poster_path: detail.poster_path,
            backdrop_path: detail.backdrop_path,
            overview: detail.overview,
            genres: detail.genres,
            details: MediaDetails::Series {
                seasons,
                episodes_flat,
            },
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> MediaKind {
        match self.details {
            MediaDetails::Movie { .. } => MediaKind::Movie,
            MediaDetails::Series { .. } => MediaKind::Series,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        self.backdrop_path.as_deref()
    }

    pub fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Movie runtime in minutes; 0 for series and unknown runtimes.
    pub fn runtime_minutes(&self) -> u32 {
        match self.details {
            MediaDetails::Movie { runtime_minutes } => runtime_minutes,
            MediaDetails::Series { .. } => 0,
        }
    }

    pub fn seasons(&self) -> &[SeasonRecord] {
        match &self.details {
            MediaDetails::Series { seasons, .. } => seasons,
            MediaDetails::Movie { .. } => &[],
        }
    }

    pub fn episodes_flat(&self) -> &[EpisodeRecord] {
        match &self.details {
            MediaDetails::Series { episodes_flat, .. } => episodes_flat,
            MediaDetails::Movie { .. } => &[],
        }
    }

    /// Look up an episode by `(season, episode)` number.
    pub fn episode(&self, season: u32, episode: u32) -> Option<&EpisodeRecord> {
        self.episodes_flat()
            .iter()
            .find(|ep| ep.season_number == season && ep.episode_number == episode)
    }

    /// Display label for one file of a torrent bundle.
    ///
    /// Series files whose name carries an `SxxEyy` marker matching a known
    /// episode get `S{s}E{e}: {episode name}`; everything else gets
    /// `{title} - File {index + 1}`.
    pub fn file_label(&self, file_name: &str, index: usize) -> String {
        if self.kind() == MediaKind::Series {
            if let Some((season, episode)) = seedfin_parser::title::parse_episode_marker(file_name)
            {
                if let Some(ep) = self.episode(season, episode) {
                    return format!("S{season}E{episode}: {}", ep.name);
                }
            }
        }
        format!("{} - File {}", self.title, index + 1)
    }
}

impl SeasonRecord {
    /// Build a season from catalog episodes, stamping each with `number`.
    pub fn new(number: u32, name: String, episodes: Vec<EpisodeDetail>) -> Self {
        let episodes = episodes
            .into_iter()
            .map(|ep| EpisodeRecord {
                episode_number: ep.episode_number,
                season_number: number,
                name: ep.name,
                overview: ep.overview,
                runtime_minutes: ep.runtime_minutes,
                still_path: ep.still_path,
            })
            .collect();

        Self {
            number,
            name,
            episodes,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn episodes(&self) -> &[EpisodeRecord] {
        &self.episodes
    }
}

impl EpisodeRecord {
    pub fn season_number(&self) -> u32 {
        self.season_number
    }

    pub fn episode_number(&self) -> u32 {
        self.episode_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }

    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime_minutes
    }

    pub fn still_path(&self) -> Option<&str> {
        self.still_path.as_deref()
    }
}

/// Wire shape of a record: `id, title, type, year, posterPath, backdropPath,
/// overview, seasons, episodes, runtime, genres`. Zero and empty fields are
/// left out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord<'a> {
    id: u64,
    title: &'a str,
    #[serde(rename = "type")]
    kind: MediaKind,
    #[serde(skip_serializing_if = "is_zero_i32")]
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    poster_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backdrop_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    seasons: &'a [SeasonRecord],
    #[serde(skip_serializing_if = "is_empty_slice")]
    episodes: &'a [EpisodeRecord],
    #[serde(skip_serializing_if = "is_zero_u32")]
    runtime: u32,
    #[serde(skip_serializing_if = "is_empty_slice")]
    genres: &'a [Genre],
}

fn is_empty_slice<T>(v: &&[T]) -> bool {
    v.is_empty()
}

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

impl Serialize for MediaRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireRecord {
            id: self.id,
            title: &self.title,
            kind: self.kind(),
            year: self.year,
            poster_path: self.poster_path(),
            backdrop_path: self.backdrop_path(),
            overview: self.overview(),
            seasons: self.seasons(),
            episodes: self.episodes_flat(),
            runtime: self.runtime_minutes(),
            genres: &self.genres,
        }
        .serialize(serializer)
    }
}
