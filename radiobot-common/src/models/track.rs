use serde::{Deserialize, Serialize};

/// One detected play, as it appears in the history buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Display-form title (post capitalization).
    pub title: String,
    /// Wall-clock time of day in the configured timezone, "HH:MM".
    pub time: String,
}

impl PlayRecord {
    pub fn new(title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
        }
    }
}

/// Track metadata derived from the first catalog search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTrack {
    pub name: String,
    /// Catalog order is preserved.
    pub artists: Vec<String>,
    pub album: String,
    pub release_date: String,
    pub cover_image_url: Option<String>,
    pub catalog_url: Option<String>,
}

/// The four distinct outcomes of a "now playing" query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NowPlaying {
    Title(String),
    CommercialBreak,
    NotFound,
    Enriched { title: String, track: EnrichedTrack },
}
