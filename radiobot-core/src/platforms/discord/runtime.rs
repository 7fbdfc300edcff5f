use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{
    CloseFrame,
    Event,
    EventTypeFlags,
    Intents,
    MessageSender,
    Shard,
    ShardId,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, GuildMarker, UserMarker};
use url::Url;

use crate::Error;
use crate::platforms::discord::{DiscordPresence, GatewayVoice};
use crate::services::RadioCommands;
use crate::services::discord::slashcommands::{handle_interaction_create, register_global_slash_commands};

/// Single-shard Discord connection.
///
/// The shard is created up front so its [`MessageSender`] can back the
/// presence reporter and voice control before the event loop starts.
pub struct DiscordPlatform {
    shard: Option<Shard>,
    sender: MessageSender,
    pub http: Arc<HttpClient>,
    pub cache: Arc<DefaultInMemoryCache>,
}

impl DiscordPlatform {
    pub fn new(token: String) -> Result<Self, Error> {
        if token.is_empty() {
            return Err(Error::Config("Discord token is empty".into()));
        }

        let http = Arc::new(
            ClientBuilder::new()
                .token(token.clone())
                .timeout(Duration::from_secs(30))
                .build(),
        );

        // only voice states are needed, to find the caller's channel
        let cache = Arc::new(
            DefaultInMemoryCache::builder()
                .resource_types(ResourceType::VOICE_STATE)
                .build(),
        );

        let shard = Shard::new(ShardId::ONE, token, Intents::GUILDS | Intents::GUILD_VOICE_STATES);
        let sender = shard.sender();

        Ok(Self {
            shard: Some(shard),
            sender,
            http,
            cache,
        })
    }

    pub fn presence(&self) -> DiscordPresence {
        DiscordPresence::new(self.sender.clone())
    }

    pub fn voice(&self, stream_url: Url) -> GatewayVoice {
        GatewayVoice::new(self.sender.clone(), stream_url)
    }

    /// Drive the gateway until it closes or `shutdown_rx` flips to `true`.
    ///
    /// Slash commands are registered on READY; each interaction is handled in
    /// its own task so a slow catalog lookup never stalls the event loop.
    pub async fn run(
        &mut self,
        commands: Arc<RadioCommands>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), Error> {
        let mut shard = self
            .shard
            .take()
            .ok_or_else(|| Error::Platform("Discord shard already running".into()))?;
        let shard_id = shard.id().number();
        info!("(DiscordPlatform) Shard {shard_id} started. Listening for events.");

        let mut application_id: Option<Id<ApplicationMarker>> = None;
        let mut bot_user_id: Option<Id<UserMarker>> = None;

        loop {
            let item = tokio::select! {
                item = shard.next_event(EventTypeFlags::all()) => item,
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("(DiscordPlatform) Shutdown requested, closing shard {shard_id}");
                        let _ = self.sender.close(CloseFrame::NORMAL);
                        break;
                    }
                    continue;
                }
            };

            let Some(item) = item else {
                break;
            };

            let event = match item {
                Ok(event) => event,
                Err(err) => {
                    error!("Shard {shard_id} => error receiving event: {err:?}");
                    continue;
                }
            };

            self.cache.update(&event);

            match event {
                Event::Ready(ready) => {
                    info!(
                        "Shard {shard_id} => READY as {} (ID={})",
                        ready.user.name, ready.user.id
                    );
                    bot_user_id = Some(ready.user.id);
                    let app_id = ready.application.id;
                    application_id = Some(app_id);
                    match register_global_slash_commands(&self.http, app_id, commands.history_capacity()).await {
                        Ok(()) => info!("Slash commands synced"),
                        Err(e) => error!("Failed to sync commands: {e}"),
                    }
                }
                Event::InteractionCreate(interaction) => {
                    let Some(app_id) = application_id else {
                        warn!("Interaction received before READY; ignoring");
                        continue;
                    };
                    let interaction = (*interaction).0;
                    let http = self.http.clone();
                    let cache = self.cache.clone();
                    let commands = commands.clone();
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_interaction_create(http, app_id, cache, commands, interaction).await
                        {
                            error!("Interaction handling failed: {e}");
                        }
                    });
                }
                Event::VoiceStateUpdate(update) => {
                    let state = &update.0;
                    debug!(
                        "Shard {shard_id} => voice state user={} channel={:?}",
                        state.user_id, state.channel_id
                    );
                    if let Some(guild) =
                        own_disconnect_guild(bot_user_id, state.user_id, state.guild_id, state.channel_id)
                    {
                        commands.handle_voice_disconnected(guild).await;
                    }
                }
                other => {
                    trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
                }
            }
        }

        warn!("(DiscordPlatform) Shard {shard_id} event loop ended.");
        Ok(())
    }
}

/// Guild the bot itself just left voice in, if this update says so.
fn own_disconnect_guild(
    bot_user_id: Option<Id<UserMarker>>,
    user_id: Id<UserMarker>,
    guild_id: Option<Id<GuildMarker>>,
    channel_id: Option<Id<ChannelMarker>>,
) -> Option<u64> {
    if bot_user_id != Some(user_id) || channel_id.is_some() {
        return None;
    }
    guild_id.map(|g| g.get())
}
