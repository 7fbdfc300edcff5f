//! src/catalog/mod.rs
//!
//! Track enrichment against an external music catalog.
//!
//! [`CatalogEnricher`] never fails: transient backend errors are retried a fixed
//! number of times with a non-blocking sleep in between, and whatever still
//! goes wrong is logged and turned into `None`.

pub mod spotify;

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use radiobot_common::models::EnrichedTrack;
use radiobot_common::traits::api::CatalogBackend;
use crate::config::SpotifyCredentials;
use crate::http::HttpClient;
use crate::Error;

pub use spotify::SpotifyCatalog;

static QUERY_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("query strip pattern is a valid regex"));

/// Strip everything but word characters, whitespace and hyphens.
pub fn clean_query(title: &str) -> String {
    QUERY_STRIP.replace_all(title, "").into_owned()
}

/// How many times a search is tried and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

pub struct CatalogEnricher {
    backend: Option<Arc<dyn CatalogBackend>>,
    retry: RetryPolicy,
}

impl CatalogEnricher {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend: Some(backend),
            retry: RetryPolicy::default(),
        }
    }

    /// Spotify-backed when credentials are configured, disabled otherwise.
    pub fn from_credentials(
        http: Arc<dyn HttpClient<Error = Error>>,
        spotify: Option<&SpotifyCredentials>,
    ) -> Self {
        match spotify {
            Some(creds) => Self::new(Arc::new(SpotifyCatalog::new(
                http,
                creds.client_id.clone(),
                creds.client_secret.clone(),
            ))),
            None => Self::disabled(),
        }
    }

    /// An enricher that always answers `None` without touching the network.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy {
            max_attempts: retry.max_attempts.max(1),
            delay: retry.delay,
        };
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Result<&Arc<dyn CatalogBackend>, Error> {
        self.backend.as_ref().ok_or(Error::CatalogUnavailable)
    }

    pub async fn enrich(&self, title: &str) -> Option<EnrichedTrack> {
        let backend = match self.backend() {
            Ok(b) => b,
            Err(e) => {
                debug!("Skipping enrichment of {:?}: {}", title, e);
                return None;
            }
        };
        let query = clean_query(title);

        for attempt in 1..=self.retry.max_attempts {
            match backend.search_track(&query).await {
                Ok(Some(track)) => {
                    debug!("Catalog hit for {:?} => {:?} by {:?}", query, track.name, track.artists);
                    return Some(track);
                }
                Ok(None) => {
                    info!("Catalog returned no results for {:?}", query);
                    return None;
                }
                Err(e) => {
                    warn!("Catalog search attempt {} failed: {}", attempt, e);
                    if attempt == self.retry.max_attempts {
                        return None;
                    }
                    sleep(self.retry.delay).await;
                }
            }
        }
        None
    }
}
