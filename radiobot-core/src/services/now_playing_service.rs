use std::sync::Arc;
use tracing::debug;

use radiobot_common::models::{NowPlaying, PlayRecord};
use crate::services::radio_context::RadioContext;
use crate::station::is_commercial_break;
use crate::Error;

/// Number of records `/lastplayed` shows when no count is given.
pub const DEFAULT_LAST_PLAYED: i64 = 10;

/// On-demand queries over the station and the play history.
///
/// Runs independently of the poller; both only read shared state through
/// [`RadioContext`].
#[derive(Clone)]
pub struct NowPlayingService {
    ctx: Arc<RadioContext>,
}

impl NowPlayingService {
    pub fn new(ctx: Arc<RadioContext>) -> Self {
        Self { ctx }
    }

    /// Fetch the live title and, when possible, catalog details for it.
    ///
    /// A commercial break is reported even though it never enters history.
    /// Enrichment failures degrade to [`NowPlaying::Title`].
    pub async fn now_playing(&self) -> Result<NowPlaying, Error> {
        let source = self
            .ctx
            .title_source
            .as_ref()
            .ok_or_else(|| Error::Config("station metadata URL is not configured".into()))?;

        let title = source.fetch_title().await?;

        if let Some(t) = title.as_deref() {
            if is_commercial_break(t, self.ctx.commercial_keyword.as_deref()) {
                return Ok(NowPlaying::CommercialBreak);
            }
        }

        let Some(title) = title else {
            return Ok(NowPlaying::NotFound);
        };

        match self.ctx.enricher.enrich(&title).await {
            Some(track) => Ok(NowPlaying::Enriched { title, track }),
            None => {
                debug!("No catalog details for {:?}", title);
                Ok(NowPlaying::Title(title))
            }
        }
    }

    /// Most-recent-first slice of history. `count` defaults to 10 and is
    /// clamped to `[1, capacity]`.
    pub fn last_played(&self, count: Option<i64>) -> Vec<PlayRecord> {
        let requested = count.unwrap_or(DEFAULT_LAST_PLAYED);
        let capacity = self.ctx.history.capacity() as i64;
        let clamped = requested.clamp(1, capacity) as usize;
        self.ctx.history.snapshot(clamped)
    }

    pub fn has_history(&self) -> bool {
        !self.ctx.history.is_empty()
    }
}
