// tests/spotify_tests.rs

use std::sync::Arc;

use radiobot_common::traits::api::CatalogBackend;
use clap::Parser;

use radiobot_core::catalog::{CatalogEnricher, SpotifyCatalog};
use radiobot_core::config::{BotConfig, RadioArgs};
use radiobot_core::Error;

mod test_utils;
use test_utils::StubHttp;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

const TOKEN_BODY: &str = r#"{"access_token":"abc123","token_type":"Bearer","expires_in":3600}"#;
const SEARCH_BODY: &str = r#"{
    "tracks": {
        "items": [{
            "name": "Hello World",
            "artists": [{"name": "Some Artist"}],
            "album": {"name": "Greatest", "release_date": "2019", "images": []},
            "external_urls": {"spotify": "https://open.spotify.com/track/xyz"}
        }]
    }
}"#;

fn catalog(http: &Arc<StubHttp>) -> SpotifyCatalog {
    SpotifyCatalog::new(http.clone(), "client", "secret")
}

#[tokio::test]
async fn token_is_fetched_once_and_reused() {
    let http = Arc::new(StubHttp::default());
    http.route(TOKEN_URL, TOKEN_BODY);
    http.route(SEARCH_URL, SEARCH_BODY);
    let spotify = catalog(&http);

    let first = spotify.search_track("hello world").await.unwrap().unwrap();
    let second = spotify.search_track("hello world").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.artists, vec!["Some Artist"]);
    assert_eq!(first.cover_image_url, None);
    assert_eq!(http.count(TOKEN_URL), 1);
    assert_eq!(http.count(SEARCH_URL), 2);

    let search = http.requests.lock().last().cloned().unwrap();
    assert!(search.contains("q=hello+world"), "{search}");
    assert!(search.contains("type=track"));
    assert!(search.contains("limit=1"));
}

#[tokio::test]
async fn empty_result_is_none() {
    let http = Arc::new(StubHttp::default());
    http.route(TOKEN_URL, TOKEN_BODY);
    http.route(SEARCH_URL, r#"{"tracks":{"items":[]}}"#);

    assert!(catalog(&http).search_track("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn failed_search_is_transient_and_drops_the_token() {
    let http = Arc::new(StubHttp::default());
    http.route(TOKEN_URL, TOKEN_BODY);
    http.route_error(SEARCH_URL, "401 Unauthorized");
    let spotify = catalog(&http);

    assert!(matches!(spotify.search_track("a").await, Err(Error::CatalogTransient(_))));

    http.route(SEARCH_URL, SEARCH_BODY);
    assert!(spotify.search_track("a").await.unwrap().is_some());
    assert_eq!(http.count(TOKEN_URL), 2);
}

#[tokio::test]
async fn token_endpoint_failure_is_transient() {
    let http = Arc::new(StubHttp::default());
    http.route_error(TOKEN_URL, "connection reset");

    assert!(matches!(
        catalog(&http).search_track("a").await,
        Err(Error::CatalogTransient(_))
    ));
    assert_eq!(http.count(SEARCH_URL), 0);
}

fn config(extra: &[&str]) -> BotConfig {
    let mut argv = vec!["radiobot", "--discord-token", "tok", "--radio-url", "http://radio.example:8000/stream"];
    argv.extend_from_slice(extra);
    RadioArgs::try_parse_from(argv).unwrap().into_config().unwrap()
}

#[tokio::test]
async fn no_credentials_means_no_catalog_traffic() {
    let http = Arc::new(StubHttp::default());
    http.route(TOKEN_URL, TOKEN_BODY);
    http.route(SEARCH_URL, SEARCH_BODY);

    let cfg = config(&[]);
    let enricher = CatalogEnricher::from_credentials(http.clone(), cfg.spotify.as_ref());

    assert!(!enricher.is_enabled());
    assert!(enricher.enrich("hello world").await.is_none());
    assert_eq!(http.count(TOKEN_URL), 0);
    assert_eq!(http.count(SEARCH_URL), 0);
}

#[tokio::test]
async fn configured_credentials_enable_spotify() {
    let http = Arc::new(StubHttp::default());
    http.route(TOKEN_URL, TOKEN_BODY);
    http.route(SEARCH_URL, SEARCH_BODY);

    let cfg = config(&["--spotify-client-id", "client", "--spotify-client-secret", "secret"]);
    let enricher = CatalogEnricher::from_credentials(http.clone(), cfg.spotify.as_ref());

    let track = enricher.enrich("hello world").await.unwrap();
    assert_eq!(track.name, "Hello World");
    assert_eq!(http.count(TOKEN_URL), 1);
    assert_eq!(http.count(SEARCH_URL), 1);
}
