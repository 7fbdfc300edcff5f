use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use chrono_tz::Tz;

use radiobot_common::traits::api::{StatusReporter, TitleSource};
use crate::catalog::CatalogEnricher;
use crate::history::HistoryStore;

/// RadioContext owns all the state the detection pipeline and the command
/// handlers share. One instance is built at startup and handed around by `Arc`.
pub struct RadioContext {
    streaming: AtomicBool,
    pub history: HistoryStore,
    pub enricher: CatalogEnricher,
    /// `None` when no station metadata URL is configured.
    pub title_source: Option<Arc<dyn TitleSource>>,
    /// Commercial-break marker title. `None` disables break filtering.
    pub commercial_keyword: Option<String>,
    pub timezone: Tz,
    pub status: Arc<dyn StatusReporter>,
}

impl RadioContext {
    pub fn new(
        history: HistoryStore,
        enricher: CatalogEnricher,
        title_source: Option<Arc<dyn TitleSource>>,
        commercial_keyword: Option<String>,
        timezone: Tz,
        status: Arc<dyn StatusReporter>,
    ) -> Self {
        Self {
            streaming: AtomicBool::new(false),
            history,
            enricher,
            title_source,
            commercial_keyword,
            timezone,
            status,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Relaxed)
    }

    pub fn set_streaming(&self, on: bool) {
        self.streaming.store(on, Ordering::Relaxed);
    }

    /// Current time of day in the station's timezone, "HH:MM".
    pub fn local_time_hhmm(&self) -> String {
        Utc::now().with_timezone(&self.timezone).format("%H:%M").to_string()
    }
}
