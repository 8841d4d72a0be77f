//! Query → [`MediaRecord`] resolution.
//!
//! Lookup order is fixed: movies first, then series. The first branch that
//! yields a search hit *and* its details wins. Nothing is retried and nothing
//! is cached; every call is an independent computation.

use std::sync::Arc;

use futures::StreamExt;
use seedfin_core::types::MediaKind;
use tracing::{debug, info, warn};

use crate::provider::{CatalogClient, SeasonSummary};
use crate::{MediaRecord, MetadataError, SeasonRecord};

pub const DEFAULT_LOCALE: &str = "ru-RU";
pub const DEFAULT_SEASON_PARALLELISM: usize = 4;

pub struct Resolver {
    client: Arc<dyn CatalogClient>,
    locale: String,
    season_parallelism: usize,
}

impl Resolver {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            locale: DEFAULT_LOCALE.to_string(),
            season_parallelism: DEFAULT_SEASON_PARALLELISM,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Max season fetches in flight for one series resolution (at least 1).
    pub fn with_season_parallelism(mut self, parallelism: usize) -> Self {
        self.season_parallelism = parallelism.max(1);
        self
    }

    /// Resolve a search query into a movie or series record.
    ///
    /// Fails with [`MetadataError::InvalidInput`] for a blank query (before any
    /// catalog call) and with [`MetadataError::Unresolved`] when both branches
    /// fail. The latter wraps the series branch's error, the last one tried.
    pub async fn resolve(&self, query: &str) -> Result<MediaRecord, MetadataError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MetadataError::InvalidInput("empty query".into()));
        }

        let movie_err = match self.try_movie(query).await {
            Ok(record) => {
                info!(query, id = record.id(), kind = %record.kind(), "resolved");
                return Ok(record);
            }
            Err(e) => e,
        };
        debug!(query, error = %movie_err, "movie lookup failed, trying series");

        match self.try_series(query).await {
            Ok(record) => {
                info!(
                    query,
                    id = record.id(),
                    kind = %record.kind(),
                    seasons = record.seasons().len(),
                    episodes = record.episodes_flat().len(),
                    "resolved"
                );
                Ok(record)
            }
            Err(series_err) => {
                info!(query, error = %series_err, "no movie or series matched");
                Err(MetadataError::Unresolved {
                    query: query.to_string(),
                    source: Box::new(series_err),
                })
            }
        }
    }

    async fn try_movie(&self, query: &str) -> Result<MediaRecord, MetadataError> {
        let page = self.client.search_movies(query, 1, &self.locale).await?;
        let hit = page
            .results
            .into_iter()
            .next()
            .ok_or(MetadataError::NoResults {
                kind: MediaKind::Movie,
            })?;

        let detail = self.client.movie_details(hit.id, &self.locale).await?;
        Ok(MediaRecord::from_movie(detail))
    }

    async fn try_series(&self, query: &str) -> Result<MediaRecord, MetadataError> {
        let page = self.client.search_series(query, 1, &self.locale).await?;
        let hit = page
            .results
            .into_iter()
            .next()
            .ok_or(MetadataError::NoResults {
                kind: MediaKind::Series,
            })?;

        let detail = self.client.series_details(hit.id, &self.locale).await?;
        let seasons = self.fetch_seasons(detail.id, &detail.seasons).await;
        Ok(MediaRecord::from_series(detail, seasons))
    }

    /// Fetch every non-special season. Results land in slots indexed by the
    /// season's position in the catalog list, so completion order does not
    /// matter. Failed seasons leave their slot empty and are dropped.
    async fn fetch_seasons(
        &self,
        series_id: u64,
        summaries: &[SeasonSummary],
    ) -> Vec<SeasonRecord> {
        let wanted: Vec<SeasonSummary> = summaries
            .iter()
            .filter(|s| s.season_number != 0)
            .cloned()
            .collect();
        let mut slots: Vec<Option<SeasonRecord>> = (0..wanted.len()).map(|_| None).collect();

        // Stream items and fetch futures own their data. Borrowed items here
        // leave the resolve future not provably `Send`.
        let mut fetches = futures::stream::iter(wanted.into_iter().enumerate())
            .map(|(slot, summary)| {
                let client = Arc::clone(&self.client);
                let locale = self.locale.clone();
                async move {
                    let result = client
                        .season_details(series_id, summary.season_number, &locale)
                        .await;
                    (slot, summary, result)
                }
            })
            .buffer_unordered(self.season_parallelism);

        while let Some((slot, summary, result)) = fetches.next().await {
            match result {
                Ok(detail) => {
                    slots[slot] = Some(SeasonRecord::new(
                        summary.season_number,
                        summary.name,
                        detail.episodes,
                    ));
                }
                Err(e) => {
                    warn!(
                        series_id,
                        season = summary.season_number,
                        error = %e,
                        "season fetch failed, skipping"
                    );
                }
            }
        }

        slots.into_iter().flatten().collect()
    }
}
