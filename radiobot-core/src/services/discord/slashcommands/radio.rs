// File: radiobot-core/src/services/discord/slashcommands/radio.rs

use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_model::application::command::CommandType;
use twilight_model::application::interaction::Interaction;
use twilight_util::builder::command::CommandBuilder;

use radiobot_common::traits::api::Responder;
use crate::services::RadioCommands;
use crate::Error;

pub fn create_radio_command() -> CommandBuilder {
    CommandBuilder::new("radio", "Join your voice channel and stream the radio", CommandType::ChatInput)
}

/// The caller's current voice channel comes from the voice-state cache.
pub async fn handle_radio_interaction(
    commands: &RadioCommands,
    cache: &Arc<DefaultInMemoryCache>,
    interaction: &Interaction,
    responder: &dyn Responder,
) -> Result<(), Error> {
    let guild_id = interaction.guild_id;
    let caller_channel = match (guild_id, interaction.author_id()) {
        (Some(guild), Some(user)) => cache
            .voice_state(user, guild)
            .map(|state| state.channel_id().get()),
        _ => None,
    };

    commands
        .handle_radio(guild_id.map(|g| g.get()), caller_channel, responder)
        .await
}
