use async_trait::async_trait;

use crate::error::Error;
use crate::models::{CommandReply, EnrichedTrack};

/// Receives detected-title changes to show as bot presence.
/// `None` clears the indicator.
#[async_trait]
pub trait StatusReporter: Send + Sync {
    async fn notify_status(&self, text: Option<String>) -> Result<(), Error>;
}

/// Sends a command reply back to whoever invoked the command.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, reply: CommandReply) -> Result<(), Error>;
}

/// Joins and leaves voice channels on the chat platform.
#[async_trait]
pub trait VoiceControl: Send + Sync {
    async fn join(&self, guild_id: u64, channel_id: u64) -> Result<(), Error>;
    async fn leave(&self, guild_id: u64) -> Result<(), Error>;
}

/// Produces the station's current track title, if any.
#[async_trait]
pub trait TitleSource: Send + Sync {
    /// `Ok(None)` means the station reports no song right now.
    async fn fetch_title(&self) -> Result<Option<String>, Error>;
}

/// A music catalog able to look up a single top match for a free-text query.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// `Ok(None)` means zero hits. `Err` is treated as transient.
    async fn search_track(&self, query: &str) -> Result<Option<EnrichedTrack>, Error>;
}
