use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use radiobot_common::traits::api::{StatusReporter, TitleSource, VoiceControl};
use radiobot_core::catalog::CatalogEnricher;
use radiobot_core::config::{BotConfig, RadioArgs};
use radiobot_core::history::HistoryStore;
use radiobot_core::platforms::discord::DiscordPlatform;
use radiobot_core::services::{RadioCommands, RadioContext};
use radiobot_core::station::IcecastTitleSource;
use radiobot_core::tasks::spawn_now_playing_poll_task;
use radiobot_core::{DefaultHttpClient, Error, HttpClient};

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("radiobot=info".parse().unwrap_or_default())
        .add_directive("radiobot_core=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = RadioArgs::parse();
    let config = args.into_config().context("invalid configuration")?;
    info!(
        "Radiobot starting. stream={}, poll every {}s, history={}",
        config.stream_url,
        config.poll_interval.as_secs(),
        config.history_capacity
    );

    if let Err(e) = run_bot(config).await {
        error!("Bot error: {:?}", e);
        return Err(e).context("radiobot stopped with an error");
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run_bot(config: BotConfig) -> Result<(), Error> {
    let http: Arc<dyn HttpClient<Error = Error>> = Arc::new(DefaultHttpClient::new());

    let title_source: Option<Arc<dyn TitleSource>> = config
        .metadata_url
        .as_ref()
        .map(|url| Arc::new(IcecastTitleSource::new(http.clone(), url.as_str())) as Arc<dyn TitleSource>);

    let enricher = CatalogEnricher::from_credentials(http.clone(), config.spotify.as_ref());

    let mut platform = DiscordPlatform::new(config.discord_token.clone())?;
    let status: Arc<dyn StatusReporter> = Arc::new(platform.presence());
    let voice: Arc<dyn VoiceControl> = Arc::new(platform.voice(config.stream_url.clone()));

    let ctx = Arc::new(RadioContext::new(
        HistoryStore::new(config.history_capacity),
        enricher,
        title_source,
        config.commercial_keyword.clone(),
        config.timezone,
        status,
    ));
    let commands = Arc::new(RadioCommands::new(ctx.clone(), voice));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let poll_handle = if ctx.title_source.is_some() {
        Some(spawn_now_playing_poll_task(ctx.clone(), config.poll_interval, shutdown_rx.clone()))
    } else {
        warn!("No title source configured; the now-playing poller is not started.");
        None
    };

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for Ctrl-C: {}", e);
            return;
        }
        info!("Ctrl-C received; shutting down.");
        let _ = shutdown_tx.send(true);
    });

    let result = platform.run(commands, shutdown_rx).await;

    if let Some(handle) = poll_handle {
        handle.abort();
        let _ = handle.await;
    }
    result
}
