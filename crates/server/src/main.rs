use std::sync::Arc;

use anyhow::Context;
use seedfin_metadata::Resolver;
use seedfin_metadata::tmdb::TmdbClient;
use seedfin_server::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        base_url = %config.tmdb_base_url,
        language = %config.tmdb_language,
        season_concurrency = config.season_concurrency,
        "catalog configured"
    );

    let http = reqwest::Client::builder()
        .timeout(config.tmdb_timeout)
        .build()
        .context("failed to build HTTP client")?;
    let catalog = TmdbClient::with_base_url(config.tmdb_api_key.clone(), &config.tmdb_base_url)
        .with_http_client(http);

    let resolver = Resolver::new(Arc::new(catalog))
        .with_locale(&config.tmdb_language)
        .with_season_parallelism(config.season_concurrency);

    let app_state = seedfin_server::state::AppState {
        resolver: Arc::new(resolver),
    };

    let app = seedfin_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
