// File: radiobot-core/src/services/discord/slashcommands/nowplaying.rs

use twilight_model::application::command::CommandType;
use twilight_util::builder::command::CommandBuilder;

use radiobot_common::traits::api::Responder;
use crate::services::RadioCommands;
use crate::Error;

pub fn create_nowplaying_command() -> CommandBuilder {
    CommandBuilder::new("nowplaying", "Show the song currently on air", CommandType::ChatInput)
}

pub async fn handle_nowplaying_interaction(
    commands: &RadioCommands,
    responder: &dyn Responder,
) -> Result<(), Error> {
    commands.handle_nowplaying(responder).await
}
