// File: radiobot-core/src/services/discord/slashcommands/mod.rs

pub mod lastplayed;
pub mod nowplaying;
pub mod radio;
pub mod stop;

use std::sync::Arc;
use tracing::{debug, warn};
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::interaction::{Interaction, InteractionData},
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::marker::ApplicationMarker,
    id::Id,
};

use radiobot_common::models::CommandReply;
use radiobot_common::traits::api::Responder;
use crate::services::discord::responder::InteractionResponder;
use crate::services::RadioCommands;
use crate::Error;
use lastplayed::{create_lastplayed_command, handle_lastplayed_interaction};
use nowplaying::{create_nowplaying_command, handle_nowplaying_interaction};
use radio::{create_radio_command, handle_radio_interaction};
use stop::{create_stop_command, handle_stop_interaction};

pub async fn register_global_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    history_capacity: usize,
) -> Result<(), Error> {
    let commands = [
        create_radio_command().build(),
        create_stop_command().build(),
        create_nowplaying_command().build(),
        create_lastplayed_command(history_capacity).build(),
    ];

    http.interaction(application_id)
        .set_global_commands(&commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

    Ok(())
}

/// Defer the interaction, then dispatch it to the matching command handler.
///
/// The deferral is ephemeral, so every reply written into it is too.
pub async fn handle_interaction_create(
    http: Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    cache: Arc<DefaultInMemoryCache>,
    commands: Arc<RadioCommands>,
    interaction: Interaction,
) -> Result<(), Error> {
    let Some(InteractionData::ApplicationCommand(data)) = &interaction.data else {
        debug!("Ignoring non-command interaction {:?}", interaction.kind);
        return Ok(());
    };

    http.interaction(application_id)
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::DeferredChannelMessageWithSource,
                data: Some(InteractionResponseData {
                    flags: Some(MessageFlags::EPHEMERAL),
                    ..Default::default()
                }),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error deferring `/{}`: {e}", data.name)))?;

    let responder = InteractionResponder::new(http.clone(), application_id, interaction.token.clone());

    match data.name.as_str() {
        "radio" => handle_radio_interaction(&commands, &cache, &interaction, &responder).await,
        "stop" => handle_stop_interaction(&commands, &interaction, &responder).await,
        "nowplaying" => handle_nowplaying_interaction(&commands, &responder).await,
        "lastplayed" => handle_lastplayed_interaction(&commands, data, &responder).await,
        other => {
            warn!("Unrecognized command: /{other}");
            responder
                .respond(CommandReply::text(format!("Unrecognized command: {other}")))
                .await
        }
    }
}
