// File: radiobot-core/src/catalog/spotify.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use radiobot_common::models::EnrichedTrack;
use radiobot_common::traits::api::CatalogBackend;
use crate::http::HttpClient;
use crate::Error;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// Tokens are renewed this long before Spotify says they expire.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Matches Spotify's JSON from the token endpoint
#[derive(Deserialize)]
struct SpotifyTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Paging,
}

#[derive(Deserialize)]
struct Paging {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Deserialize)]
struct SpotifyTrack {
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
    album: SpotifyAlbum,
    #[serde(default)]
    external_urls: HashMap<String, String>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Deserialize)]
struct SpotifyAlbum {
    name: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

#[derive(Deserialize)]
struct SpotifyImage {
    url: String,
}

impl From<SpotifyTrack> for EnrichedTrack {
    fn from(track: SpotifyTrack) -> Self {
        let SpotifyTrack { name, artists, album, mut external_urls } = track;
        EnrichedTrack {
            name,
            artists: artists.into_iter().map(|a| a.name).collect(),
            album: album.name,
            release_date: album.release_date.unwrap_or_default(),
            cover_image_url: album.images.into_iter().next().map(|i| i.url),
            catalog_url: external_urls.remove("spotify"),
        }
    }
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Spotify Web API search using the client-credentials flow.
pub struct SpotifyCatalog {
    http: Arc<dyn HttpClient<Error = Error>>,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyCatalog {
    pub fn new(
        http: Arc<dyn HttpClient<Error = Error>>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, Error> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Utc::now() {
                return Ok(cached.access_token.clone());
            }
        }

        let basic = BASE64.encode(format!("{}:{}", self.client_id, self.client_secret));
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), format!("Basic {basic}"));
        let form = vec![("grant_type".to_string(), "client_credentials".to_string())];

        let body = self.http.post_form(TOKEN_URL.to_string(), headers, form).await?;
        let resp: SpotifyTokenResponse = serde_json::from_str(&body)?;

        let lifetime = (resp.expires_in - TOKEN_EXPIRY_MARGIN_SECS).max(0);
        info!("Obtained Spotify access token (valid for ~{}s)", lifetime);
        *guard = Some(CachedToken {
            access_token: resp.access_token.clone(),
            expires_at: Utc::now() + Duration::seconds(lifetime),
        });
        Ok(resp.access_token)
    }

    async fn search(&self, query: &str) -> Result<Option<EnrichedTrack>, Error> {
        let token = self.access_token().await?;
        let url = url::Url::parse_with_params(
            SEARCH_URL,
            &[("q", query), ("type", "track"), ("limit", "1")],
        )
        .map_err(|e| Error::Parse(format!("bad search url: {e}")))?;

        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));

        let body = self.http.get(url.to_string(), headers).await?;
        let resp: SearchResponse = serde_json::from_str(&body)?;
        debug!("Spotify search {:?} => {} item(s)", query, resp.tracks.items.len());
        Ok(resp.tracks.items.into_iter().next().map(EnrichedTrack::from))
    }
}

#[async_trait]
impl CatalogBackend for SpotifyCatalog {
    async fn search_track(&self, query: &str) -> Result<Option<EnrichedTrack>, Error> {
        match self.search(query).await {
            Ok(found) => Ok(found),
            Err(e) => {
                // a stale or revoked token is the usual culprit; fetch a fresh one next time
                *self.token.lock().await = None;
                Err(Error::CatalogTransient(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_first_hit() {
        let body = r#"{
            "tracks": {
                "items": [{
                    "name": "Hey Jude",
                    "artists": [{"name": "The Beatles"}, {"name": "Somebody Else"}],
                    "album": {
                        "name": "Hey Jude",
                        "release_date": "1968-08-26",
                        "images": [{"url": "https://i.scdn.co/big"}, {"url": "https://i.scdn.co/small"}]
                    },
                    "external_urls": {"spotify": "https://open.spotify.com/track/abc"}
                }]
            }
        }"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let track: EnrichedTrack = resp.tracks.items.into_iter().next().unwrap().into();
        assert_eq!(track.name, "Hey Jude");
        assert_eq!(track.artists, vec!["The Beatles", "Somebody Else"]);
        assert_eq!(track.album, "Hey Jude");
        assert_eq!(track.release_date, "1968-08-26");
        assert_eq!(track.cover_image_url.as_deref(), Some("https://i.scdn.co/big"));
        assert_eq!(track.catalog_url.as_deref(), Some("https://open.spotify.com/track/abc"));
    }

    #[test]
    fn missing_images_and_links() {
        let body = r#"{"tracks":{"items":[{"name":"X","artists":[],"album":{"name":"Y","images":[]}}]}}"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let track: EnrichedTrack = resp.tracks.items.into_iter().next().unwrap().into();
        assert_eq!(track.cover_image_url, None);
        assert_eq!(track.catalog_url, None);
        assert_eq!(track.release_date, "");
    }

    #[test]
    fn zero_hits() {
        let resp: SearchResponse = serde_json::from_str(r#"{"tracks":{"items":[]}}"#).unwrap();
        assert!(resp.tracks.items.is_empty());
    }
}
