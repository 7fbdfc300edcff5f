//! HTTP client abstraction for the station metadata endpoint and the catalog backend.
//!
//! Everything that talks HTTP goes through [`HttpClient`] so tests can swap in a
//! stub instead of making real network requests. A non-2xx status is reported
//! as [`Error::Fetch`] the same way a connection failure is; callers decide
//! whether that is fatal or retryable.
//!
//! # Example Usage:
//! ``
//! use crate::http::{HttpClient, DefaultHttpClient};
//!
//! let client: Arc<dyn HttpClient<Error = Error>> = Arc::new(DefaultHttpClient::new());
//! let body = client.get(url, HashMap::new()).await?;
//! ``

use async_trait::async_trait;
use reqwest;
use std::collections::HashMap;
use std::time::Duration;
use crate::Error;

/// A generic trait for making HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Self::Error>;
    async fn post_form(
        &self,
        url: String,
        headers: HashMap<String, String>,
        form: Vec<(String, String)>,
    ) -> Result<String, Self::Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("radiobot/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for DefaultHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    type Error = Error;

    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<String, Self::Error> {
        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("GET {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Fetch(format!("GET {url} returned error status: {e}")))?
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("GET {url} body read failed: {e}")))?;
        Ok(response)
    }

    async fn post_form(
        &self,
        url: String,
        headers: HashMap<String, String>,
        form: Vec<(String, String)>,
    ) -> Result<String, Self::Error> {
        let mut request = self.client.post(&url).form(&form);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("POST {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Fetch(format!("POST {url} returned error status: {e}")))?
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("POST {url} body read failed: {e}")))?;
        Ok(response)
    }
}
