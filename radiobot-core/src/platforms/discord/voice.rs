//! voice.rs
//!
//! Joins and leaves voice channels by sending voice-state updates over the
//! gateway shard. Feeding PCM into the resulting voice connection is left to
//! an audio driver attached on top; this only moves the bot in and out.

use async_trait::async_trait;
use tracing::info;
use twilight_gateway::MessageSender;
use twilight_model::gateway::payload::outgoing::UpdateVoiceState;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker};
use url::Url;

use radiobot_common::traits::api::VoiceControl;
use crate::Error;

#[derive(Clone)]
pub struct GatewayVoice {
    sender: MessageSender,
    stream_url: Url,
}

impl GatewayVoice {
    pub fn new(sender: MessageSender, stream_url: Url) -> Self {
        Self { sender, stream_url }
    }
}

fn guild_id(raw: u64) -> Result<Id<GuildMarker>, Error> {
    Id::new_checked(raw).ok_or_else(|| Error::Platform(format!("Invalid guild ID: {raw}")))
}

#[async_trait]
impl VoiceControl for GatewayVoice {
    async fn join(&self, guild: u64, channel: u64) -> Result<(), Error> {
        let channel_id: Id<ChannelMarker> = Id::new_checked(channel)
            .ok_or_else(|| Error::Platform(format!("Invalid channel ID: {channel}")))?;
        // deafened: the bot only ever plays
        let update = UpdateVoiceState::new(guild_id(guild)?, Some(channel_id), true, false);
        self.sender
            .command(&update)
            .map_err(|e| Error::Platform(format!("Error joining voice channel: {e}")))?;
        info!("(GatewayVoice) joined guild={} channel={} source={}", guild, channel, self.stream_url);
        Ok(())
    }

    async fn leave(&self, guild: u64) -> Result<(), Error> {
        let update = UpdateVoiceState::new(guild_id(guild)?, None::<Id<ChannelMarker>>, false, false);
        self.sender
            .command(&update)
            .map_err(|e| Error::Platform(format!("Error leaving voice channel: {e}")))?;
        info!("(GatewayVoice) left guild={}", guild);
        Ok(())
    }
}
