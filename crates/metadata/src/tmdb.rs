//! TMDB (The Movie Database) catalog client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use crate::MetadataError;
use crate::provider::{
    CatalogClient, EpisodeDetail, Genre, MovieDetail, SearchPage, SearchResult, SeasonDetail,
    SeasonSummary, SeriesDetail,
};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Replace the HTTP client, e.g. one built with a request timeout.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }

    async fn search(
        &self,
        path: &str,
        title_key: &str,
        date_key: &str,
        query: &str,
        page: u32,
        locale: &str,
    ) -> Result<SearchPage, MetadataError> {
        let page_str = page.to_string();
        let data = self
            .get_json(
                path,
                &[
                    ("query", query),
                    ("page", page_str.as_str()),
                    ("language", locale),
                ],
            )
            .await?;

        Ok(parse_search_page(&data, title_key, date_key))
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        locale: &str,
    ) -> Result<SearchPage, MetadataError> {
        self.search("/search/movie", "title", "release_date", query, page, locale)
            .await
    }

    async fn search_series(
        &self,
        query: &str,
        page: u32,
        locale: &str,
    ) -> Result<SearchPage, MetadataError> {
        self.search("/search/tv", "name", "first_air_date", query, page, locale)
            .await
    }

    async fn movie_details(&self, id: u64, locale: &str) -> Result<MovieDetail, MetadataError> {
        let data = self
            .get_json(&format!("/movie/{id}"), &[("language", locale)])
            .await?;

        Ok(parse_movie_detail(&data))
    }

    async fn series_details(&self, id: u64, locale: &str) -> Result<SeriesDetail, MetadataError> {
        let data = self
            .get_json(&format!("/tv/{id}"), &[("language", locale)])
            .await?;

        Ok(parse_series_detail(&data))
    }

    async fn season_details(
        &self,
        series_id: u64,
        season_number: u32,
        locale: &str,
    ) -> Result<SeasonDetail, MetadataError> {
        let data = self
            .get_json(
                &format!("/tv/{series_id}/season/{season_number}"),
                &[("language", locale)],
            )
            .await?;

        Ok(parse_season_detail(&data))
    }
}

// TMDB sends "" for many missing text fields.
fn text(v: &serde_json::Value) -> Option<String> {
    v.as_str().filter(|s| !s.is_empty()).map(|s| s.to_string())
}

fn number(v: &serde_json::Value) -> Option<u32> {
    v.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn parse_search_page(data: &serde_json::Value, title_key: &str, date_key: &str) -> SearchPage {
    let results = data["results"].as_array().cloned().unwrap_or_default();

    SearchPage {
        page: number(&data["page"]).unwrap_or(1),
        total_results: number(&data["total_results"]).unwrap_or(0),
        results: results
            .iter()
            .filter_map(|r| {
                Some(SearchResult {
                    id: r["id"].as_u64()?,
                    title: r[title_key].as_str().unwrap_or("Unknown").to_string(),
                    release_date: text(&r[date_key]),
                    overview: text(&r["overview"]),
                    poster_path: text(&r["poster_path"]),
                })
            })
            .collect(),
    }
}

fn parse_genres(data: &serde_json::Value) -> Vec<Genre> {
    data["genres"]
        .as_array()
        .map(|gs| {
            gs.iter()
                .filter_map(|g| {
                    Some(Genre {
                        id: g["id"].as_u64()?,
                        name: g["name"].as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_movie_detail(data: &serde_json::Value) -> MovieDetail {
    MovieDetail {
        id: data["id"].as_u64().unwrap_or(0),
        title: data["title"].as_str().unwrap_or("").to_string(),
        release_date: text(&data["release_date"]),
        poster_path: text(&data["poster_path"]),
        backdrop_path: text(&data["backdrop_path"]),
        overview: text(&data["overview"]),
        runtime_minutes: number(&data["runtime"]),
        genres: parse_genres(data),
    }
}

fn parse_series_detail(data: &serde_json::Value) -> SeriesDetail {
    SeriesDetail {
        id: data["id"].as_u64().unwrap_or(0),
        name: data["name"].as_str().unwrap_or("").to_string(),
        first_air_date: text(&data["first_air_date"]),
        poster_path: text(&data["poster_path"]),
        backdrop_path: text(&data["backdrop_path"]),
        overview: text(&data["overview"]),
        genres: parse_genres(data),
        seasons: data["seasons"]
            .as_array()
            .map(|ss| {
                ss.iter()
                    .filter_map(|s| {
                        Some(SeasonSummary {
                            season_number: number(&s["season_number"])?,
                            name: s["name"].as_str().unwrap_or("").to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn parse_season_detail(data: &serde_json::Value) -> SeasonDetail {
    let episodes = data["episodes"].as_array().cloned().unwrap_or_default();

    SeasonDetail {
        episodes: episodes
            .iter()
            .filter_map(|ep| {
                Some(EpisodeDetail {
                    episode_number: number(&ep["episode_number"])?,
                    name: ep["name"].as_str().unwrap_or("").to_string(),
                    overview: text(&ep["overview"]),
                    runtime_minutes: number(&ep["runtime"]),
                    still_path: text(&ep["still_path"]),
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_detail_from_json() {
        let json = serde_json::json!({
            "id": 27205,
            "title": "Inception",
            "original_title": "Inception",
            "overview": "A thief who steals corporate secrets...",
            "release_date": "2010-07-16",
            "runtime": 148,
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ]
        });

        let movie = parse_movie_detail(&json);
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.release_date.as_deref(), Some("2010-07-16"));
        assert_eq!(movie.runtime_minutes, Some(148));
        assert_eq!(movie.poster_path.as_deref(), Some("/poster.jpg"));
        assert_eq!(
            movie.genres,
            vec![
                Genre {
                    id: 28,
                    name: "Action".into(),
                },
                Genre {
                    id: 878,
                    name: "Science Fiction".into(),
                },
            ]
        );
    }

    #[test]
    fn parse_series_detail_from_json() {
        let json = serde_json::json!({
            "id": 1396,
            "name": "Breaking Bad",
            "overview": "",
            "first_air_date": "2008-01-20",
            "poster_path": "/bb.jpg",
            "backdrop_path": null,
            "genres": [{ "id": 18, "name": "Drama" }],
            "seasons": [
                { "season_number": 0, "name": "Specials" },
                { "season_number": 1, "name": "Season 1" },
                { "name": "broken entry" }
            ]
        });

        let series = parse_series_detail(&json);
        assert_eq!(series.name, "Breaking Bad");
        assert_eq!(series.overview, None);
        assert_eq!(series.backdrop_path, None);
        assert_eq!(series.seasons.len(), 2);
        assert_eq!(series.seasons[1].season_number, 1);
        assert_eq!(series.seasons[1].name, "Season 1");
    }

    #[test]
    fn parse_search_page_uses_kind_specific_keys() {
        let json = serde_json::json!({
            "page": 1,
            "total_results": 2,
            "results": [
                { "id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20" },
                { "name": "missing id" }
            ]
        });

        let page = parse_search_page(&json, "name", "first_air_date");
        assert_eq!(page.total_results, 2);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 1396);
        assert_eq!(page.results[0].title, "Breaking Bad");
        assert_eq!(page.results[0].release_date.as_deref(), Some("2008-01-20"));
    }

    #[test]
    fn parse_season_detail_from_json() {
        let json = serde_json::json!({
            "episodes": [
                { "episode_number": 1, "name": "Pilot", "runtime": 58, "still_path": "/s1.jpg" },
                { "episode_number": 2, "name": "Cat's in the Bag...", "runtime": null }
            ]
        });

        let season = parse_season_detail(&json);
        assert_eq!(season.episodes.len(), 2);
        assert_eq!(season.episodes[0].runtime_minutes, Some(58));
        assert_eq!(season.episodes[0].still_path.as_deref(), Some("/s1.jpg"));
        assert_eq!(season.episodes[1].runtime_minutes, None);
    }
}
