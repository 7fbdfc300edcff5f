// ================================================================
// File: radiobot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Network or non-2xx failure while reaching the station metadata endpoint.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Malformed JSON or an unexpected document shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Retryable failure from the catalog backend.
    #[error("Catalog error: {0}")]
    CatalogTransient(String),

    /// No catalog credentials configured; enrichment is skipped.
    #[error("Catalog unavailable")]
    CatalogUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
