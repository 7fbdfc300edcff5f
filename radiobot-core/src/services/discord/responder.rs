// File: radiobot-core/src/services/discord/responder.rs

use std::sync::Arc;
use async_trait::async_trait;
use twilight_http::Client as HttpClient;
use twilight_model::channel::message::Embed;
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;

use radiobot_common::models::CommandReply;
use radiobot_common::traits::api::Responder;
use crate::services::discord::embeds::{last_played_embed, now_playing_embed, now_playing_text};
use crate::Error;

/// Fills in the deferred (ephemeral) response of one interaction.
pub struct InteractionResponder {
    http: Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    token: String,
}

impl InteractionResponder {
    pub fn new(http: Arc<HttpClient>, application_id: Id<ApplicationMarker>, token: String) -> Self {
        Self { http, application_id, token }
    }

    async fn update(&self, content: Option<&str>, embeds: &[Embed]) -> Result<(), Error> {
        self.http
            .interaction(self.application_id)
            .update_response(&self.token)
            .content(content)
            .embeds(Some(embeds))
            .await
            .map_err(|e| Error::Platform(format!("Error updating interaction response: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn respond(&self, reply: CommandReply) -> Result<(), Error> {
        match reply {
            CommandReply::Text(text) => self.update(Some(&text), &[]).await,
            CommandReply::NowPlaying { title, track } => {
                let text = now_playing_text(&title);
                let embeds: Vec<Embed> = track.iter().map(now_playing_embed).collect();
                self.update(Some(&text), &embeds).await
            }
            CommandReply::LastPlayed(records) => {
                self.update(None, &[last_played_embed(&records)]).await
            }
        }
    }
}
