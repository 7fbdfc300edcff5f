// File: radiobot-core/src/services/discord/slashcommands/stop.rs

use twilight_model::application::command::CommandType;
use twilight_model::application::interaction::Interaction;
use twilight_util::builder::command::CommandBuilder;

use radiobot_common::traits::api::Responder;
use crate::services::RadioCommands;
use crate::Error;

pub fn create_stop_command() -> CommandBuilder {
    CommandBuilder::new("stop", "Stop the radio and leave the voice channel", CommandType::ChatInput)
}

pub async fn handle_stop_interaction(
    commands: &RadioCommands,
    interaction: &Interaction,
    responder: &dyn Responder,
) -> Result<(), Error> {
    commands
        .handle_stop(interaction.guild_id.map(|g| g.get()), responder)
        .await
}
