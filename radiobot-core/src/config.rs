// File: radiobot-core/src/config.rs

use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use tracing::warn;
use url::Url;

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::tasks::DEFAULT_POLL_INTERVAL;
use crate::Error;

/// Command-line flags, each with an environment fallback. A `.env` file is
/// loaded by the binary before these are parsed.
#[derive(Parser, Debug, Clone)]
#[command(name = "radiobot")]
#[command(author, version, about = "Radiobot - Discord radio relay with now-playing tracking")]
pub struct RadioArgs {
    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: String,

    /// Radio stream URL relayed into voice
    #[arg(long, env = "RADIO_URL")]
    pub radio_url: String,

    /// Icecast status JSON endpoint; detection is disabled without it
    #[arg(long, env = "SONGS_URL")]
    pub songs_url: Option<String>,

    /// Title the station reports during commercial breaks
    #[arg(long, env = "KEYWORD")]
    pub keyword: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub spotify_client_id: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    /// IANA timezone used for play timestamps
    #[arg(long, env = "RADIO_TIMEZONE", default_value = "Europe/Athens")]
    pub timezone: String,

    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    pub poll_interval_secs: u64,

    #[arg(long, env = "HISTORY_CAPACITY", default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub stream_url: Url,
    pub metadata_url: Option<Url>,
    pub commercial_keyword: Option<String>,
    pub spotify: Option<SpotifyCredentials>,
    pub timezone: Tz,
    pub poll_interval: Duration,
    pub history_capacity: usize,
}

impl RadioArgs {
    pub fn into_config(self) -> Result<BotConfig, Error> {
        let discord_token = non_empty(Some(self.discord_token))
            .ok_or_else(|| Error::Config("DISCORD_TOKEN must not be empty".into()))?;

        let stream_url = Url::parse(self.radio_url.trim())
            .map_err(|e| Error::Config(format!("RADIO_URL is not a valid URL: {e}")))?;

        let metadata_url = match non_empty(self.songs_url) {
            Some(s) => Some(
                Url::parse(&s).map_err(|e| Error::Config(format!("SONGS_URL is not a valid URL: {e}")))?,
            ),
            None => {
                warn!("SONGS_URL not configured. Now playing and history will not work.");
                None
            }
        };

        let commercial_keyword = non_empty(self.keyword);
        if commercial_keyword.is_none() {
            warn!("KEYWORD not configured. Commercial break detection is disabled.");
        }

        let spotify = match (non_empty(self.spotify_client_id), non_empty(self.spotify_client_secret)) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyCredentials { client_id, client_secret }),
            _ => {
                warn!("Spotify API credentials not configured. Track details are disabled.");
                None
            }
        };

        let timezone = self
            .timezone
            .trim()
            .parse::<Tz>()
            .map_err(|e| Error::Config(format!("unknown timezone {:?}: {e}", self.timezone)))?;

        if self.poll_interval_secs == 0 {
            return Err(Error::Config("POLL_INTERVAL_SECS must be at least 1".into()));
        }

        Ok(BotConfig {
            discord_token,
            stream_url,
            metadata_url,
            commercial_keyword,
            spotify,
            timezone,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            history_capacity: self.history_capacity.max(1),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
