// radiobot-core/src/tasks/now_playing_poll.rs

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use radiobot_common::models::PlayRecord;
use crate::services::radio_context::RadioContext;
use crate::station::is_commercial_break;

/// How often the station is polled while streaming.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Whether a tick does any work, derived from the streaming flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

impl PollState {
    pub fn of(ctx: &RadioContext) -> Self {
        if ctx.is_streaming() {
            PollState::Polling
        } else {
            PollState::Idle
        }
    }
}

/// What a single detection cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Not streaming; nothing was fetched.
    Idle,
    NoTitle,
    CommercialBreak,
    /// Same display title as the latest history entry.
    Duplicate,
    Recorded(PlayRecord),
    /// Fetch or status update failed. Retried implicitly on the next tick.
    Failed(String),
}

/// Run one fetch → filter → record pass.
///
/// Never returns an error: every failure is folded into
/// [`CycleOutcome::Failed`] so the scheduler can log it and move on.
pub async fn run_detection_cycle(ctx: &RadioContext) -> CycleOutcome {
    if PollState::of(ctx) == PollState::Idle {
        return CycleOutcome::Idle;
    }

    let Some(source) = ctx.title_source.as_ref() else {
        return CycleOutcome::NoTitle;
    };

    let title = match source.fetch_title().await {
        Ok(Some(t)) => t,
        Ok(None) => return CycleOutcome::NoTitle,
        Err(e) => return CycleOutcome::Failed(e.to_string()),
    };

    if is_commercial_break(&title, ctx.commercial_keyword.as_deref()) {
        return CycleOutcome::CommercialBreak;
    }

    // raw display-form equality, not normalized
    if ctx.history.last_title().as_deref() == Some(title.as_str()) {
        return CycleOutcome::Duplicate;
    }

    if let Err(e) = ctx.status.notify_status(Some(title.clone())).await {
        return CycleOutcome::Failed(format!("status update failed: {e}"));
    }

    let record = PlayRecord::new(title, ctx.local_time_hhmm());
    ctx.history.append(record.clone());
    CycleOutcome::Recorded(record)
}

/// Spawns the background task that runs a detection cycle every `period`
/// until `shutdown_rx` flips to `true`.
pub fn spawn_now_playing_poll_task(
    ctx: Arc<RadioContext>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Now-playing poller started (every {}s)", period.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match run_detection_cycle(&ctx).await {
                        CycleOutcome::Recorded(rec) => {
                            info!("Now playing: {} ({})", rec.title, rec.time);
                        }
                        CycleOutcome::Failed(reason) => {
                            warn!("Detection cycle failed: {}", reason);
                        }
                        other => {
                            debug!("Detection cycle => {:?}", other);
                        }
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Now-playing poller stopped");
    })
}
