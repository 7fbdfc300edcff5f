// File: radiobot-core/src/services/radio_commands.rs

use std::collections::HashSet;
use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use radiobot_common::models::{CommandReply, NowPlaying};
use radiobot_common::traits::api::{Responder, VoiceControl};
use crate::services::now_playing_service::NowPlayingService;
use crate::services::radio_context::RadioContext;
use crate::Error;

pub const MSG_NOT_IN_VOICE: &str = "You must be in a voice channel to use /radio";
pub const MSG_JOIN_FAILED: &str = "Could not connect to your voice channel.";
pub const MSG_STREAMING: &str = "🎶 Now streaming Radio!";
pub const MSG_DISCONNECTED: &str = "Disconnected.";
pub const MSG_NOT_CONNECTED: &str = "Not connected to a voice channel...";
pub const MSG_COMMERCIAL: &str = "Now Playing: **Commercial Break**";
pub const MSG_NOT_FOUND: &str = "Could not find the current song.";
pub const MSG_FETCH_ERROR: &str = "Error fetching song.";
pub const MSG_NO_HISTORY: &str = "No previous history available yet";

/// Presence text shown while connected but before the first detected title.
pub const STATUS_STREAMING: &str = "Radio!";

/// Platform-independent handlers behind the slash commands.
///
/// Each handler ends by sending exactly one [`CommandReply`] through the
/// given responder.
pub struct RadioCommands {
    ctx: Arc<RadioContext>,
    now_playing: NowPlayingService,
    voice: Arc<dyn VoiceControl>,
    /// Guarded together with the streaming flag it determines.
    connected_guilds: Mutex<HashSet<u64>>,
}

impl RadioCommands {
    pub fn new(ctx: Arc<RadioContext>, voice: Arc<dyn VoiceControl>) -> Self {
        Self {
            now_playing: NowPlayingService::new(ctx.clone()),
            ctx,
            voice,
            connected_guilds: Mutex::new(HashSet::new()),
        }
    }

    pub fn history_capacity(&self) -> usize {
        self.ctx.history.capacity()
    }

    pub fn is_connected(&self, guild_id: u64) -> bool {
        self.connected_guilds.lock().contains(&guild_id)
    }

    /// Record a connection; returns whether any guild was connected before.
    fn mark_connected(&self, guild_id: u64) -> bool {
        let mut guilds = self.connected_guilds.lock();
        let was_streaming = !guilds.is_empty();
        guilds.insert(guild_id);
        self.ctx.set_streaming(true);
        was_streaming
    }

    /// Forget a connection. `None` if the guild was not connected, otherwise
    /// whether streaming continues elsewhere.
    fn mark_disconnected(&self, guild_id: u64) -> Option<bool> {
        let mut guilds = self.connected_guilds.lock();
        if !guilds.remove(&guild_id) {
            return None;
        }
        let still_streaming = !guilds.is_empty();
        self.ctx.set_streaming(still_streaming);
        Some(still_streaming)
    }

    async fn clear_status(&self) {
        if let Err(e) = self.ctx.status.notify_status(None).await {
            warn!("Could not clear presence: {}", e);
        }
    }

    /// `/radio`: join the caller's voice channel and start detection.
    pub async fn handle_radio(
        &self,
        guild_id: Option<u64>,
        caller_channel: Option<u64>,
        responder: &dyn Responder,
    ) -> Result<(), Error> {
        let (Some(guild_id), Some(channel_id)) = (guild_id, caller_channel) else {
            return responder.respond(CommandReply::text(MSG_NOT_IN_VOICE)).await;
        };

        if let Err(e) = self.voice.join(guild_id, channel_id).await {
            warn!("Voice join failed for guild={} channel={}: {}", guild_id, channel_id, e);
            return responder.respond(CommandReply::text(MSG_JOIN_FAILED)).await;
        }

        let was_streaming = self.mark_connected(guild_id);
        info!("Streaming in guild={} channel={}", guild_id, channel_id);

        if !was_streaming {
            if let Err(e) = self.ctx.status.notify_status(Some(STATUS_STREAMING.to_string())).await {
                warn!("Could not set presence: {}", e);
            }
        }

        responder.respond(CommandReply::text(MSG_STREAMING)).await
    }

    /// `/stop`: leave voice in this guild and stop detection.
    pub async fn handle_stop(&self, guild_id: Option<u64>, responder: &dyn Responder) -> Result<(), Error> {
        let Some((guild_id, still_streaming)) =
            guild_id.and_then(|g| self.mark_disconnected(g).map(|still| (g, still)))
        else {
            return responder.respond(CommandReply::text(MSG_NOT_CONNECTED)).await;
        };

        if let Err(e) = self.voice.leave(guild_id).await {
            warn!("Voice leave failed for guild={}: {}", guild_id, e);
        }
        if !still_streaming {
            self.clear_status().await;
        }
        info!("Stopped streaming in guild={}", guild_id);

        responder.respond(CommandReply::text(MSG_DISCONNECTED)).await
    }

    /// The bot left voice in `guild_id` without `/stop`, e.g. kicked by a
    /// moderator. Returns `false` when the guild was not tracked as connected.
    pub async fn handle_voice_disconnected(&self, guild_id: u64) -> bool {
        let Some(still_streaming) = self.mark_disconnected(guild_id) else {
            return false;
        };
        info!("Voice connection in guild={} closed externally", guild_id);
        if !still_streaming {
            self.clear_status().await;
        }
        true
    }

    /// `/nowplaying`
    pub async fn handle_nowplaying(&self, responder: &dyn Responder) -> Result<(), Error> {
        let reply = match self.now_playing.now_playing().await {
            Ok(NowPlaying::CommercialBreak) => CommandReply::text(MSG_COMMERCIAL),
            Ok(NowPlaying::NotFound) => CommandReply::text(MSG_NOT_FOUND),
            Ok(NowPlaying::Title(title)) => CommandReply::NowPlaying { title, track: None },
            Ok(NowPlaying::Enriched { title, track }) => CommandReply::NowPlaying {
                title,
                track: Some(track),
            },
            Err(e) => {
                error!("Now playing lookup failed: {}", e);
                CommandReply::text(MSG_FETCH_ERROR)
            }
        };
        responder.respond(reply).await
    }

    /// `/lastplayed [num]`
    pub async fn handle_lastplayed(&self, count: Option<i64>, responder: &dyn Responder) -> Result<(), Error> {
        if !self.now_playing.has_history() {
            return responder.respond(CommandReply::text(MSG_NO_HISTORY)).await;
        }
        let records = self.now_playing.last_played(count);
        responder.respond(CommandReply::LastPlayed(records)).await
    }
}
