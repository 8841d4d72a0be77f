use crate::MetadataError;

/// A media catalog that can search for and describe movies and series.
///
/// Implementations own authentication, rate limiting and transport retries;
/// every call here is a single request/response.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    fn name(&self) -> &str;

    /// Search movies by free-text title.
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        locale: &str,
    ) -> Result<SearchPage, MetadataError>;

    /// Search TV series by free-text title.
    async fn search_series(
        &self,
        query: &str,
        page: u32,
        locale: &str,
    ) -> Result<SearchPage, MetadataError>;

    /// Full movie details by catalog id.
    async fn movie_details(&self, id: u64, locale: &str) -> Result<MovieDetail, MetadataError>;

    /// Full series details, including the season list, by catalog id.
    async fn series_details(&self, id: u64, locale: &str) -> Result<SeriesDetail, MetadataError>;

    /// Episode list of one season of a series.
    async fn season_details(
        &self,
        series_id: u64,
        season_number: u32,
        locale: &str,
    ) -> Result<SeasonDetail, MetadataError>;
}

/// One page of search hits, in the catalog's relevance order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchPage {
    pub page: u32,
    pub total_results: u32,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesDetail {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<Genre>,
    pub seasons: Vec<SeasonSummary>,
}

/// Entry of a series' season list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeasonDetail {
    pub episodes: Vec<EpisodeDetail>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EpisodeDetail {
    pub episode_number: u32,
    pub name: String,
    pub overview: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub still_path: Option<String>,
}
