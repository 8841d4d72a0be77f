use seedfin_metadata::MetadataError;
use seedfin_metadata::provider::CatalogClient;
use seedfin_metadata::tmdb::TmdbClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::with_base_url("test-key".to_string(), server.uri())
}

#[tokio::test]
async fn search_movies_sends_query_and_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("query", "Inception"))
        .and(query_param("page", "1"))
        .and(query_param("language", "ru-RU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_results": 1,
            "results": [
                { "id": 27205, "title": "Inception", "release_date": "2010-07-16" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_movies("Inception", 1, "ru-RU")
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].id, 27205);
    assert_eq!(page.results[0].title, "Inception");
}

#[tokio::test]
async fn season_details_hits_nested_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/1396/season/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "episodes": [
                { "episode_number": 1, "name": "Seven Thirty-Seven", "runtime": 47 },
                { "episode_number": 2, "name": "Grilled", "runtime": 46 }
            ]
        })))
        .mount(&server)
        .await;

    let season = client_for(&server)
        .season_details(1396, 2, "en-US")
        .await
        .unwrap();

    assert_eq!(season.episodes.len(), 2);
    assert_eq!(season.episodes[1].name, "Grilled");
}

#[tokio::test]
async fn missing_resource_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .movie_details(1, "en-US")
        .await
        .unwrap_err();

    assert!(matches!(err, MetadataError::NotFound));
}

#[tokio::test]
async fn server_error_maps_to_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/5"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .series_details(5, "en-US")
        .await
        .unwrap_err();

    match err {
        MetadataError::Provider(msg) => assert!(msg.contains("503"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_maps_to_network_error() {
    let client = TmdbClient::with_base_url("k".to_string(), "http://127.0.0.1:9");

    let err = client.search_series("x", 1, "en-US").await.unwrap_err();

    assert!(matches!(err, MetadataError::Network(_)));
}
