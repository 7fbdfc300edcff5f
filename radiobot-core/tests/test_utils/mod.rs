// tests/test_utils/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use radiobot_common::models::{CommandReply, EnrichedTrack};
use radiobot_common::traits::api::{Responder, StatusReporter, TitleSource, VoiceControl};
use radiobot_core::catalog::CatalogEnricher;
use radiobot_core::history::HistoryStore;
use radiobot_core::services::RadioContext;
use radiobot_core::{Error, HttpClient};

/// Title source whose next answer is set by the test.
pub struct StubTitleSource {
    next: Mutex<Result<Option<String>, String>>,
    calls: Mutex<usize>,
}

impl StubTitleSource {
    pub fn new(title: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            next: Mutex::new(Ok(title.map(str::to_string))),
            calls: Mutex::new(0),
        })
    }

    pub fn set_title(&self, title: Option<&str>) {
        *self.next.lock() = Ok(title.map(str::to_string));
    }

    pub fn fail(&self, reason: &str) {
        *self.next.lock() = Err(reason.to_string());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl TitleSource for StubTitleSource {
    async fn fetch_title(&self) -> Result<Option<String>, Error> {
        *self.calls.lock() += 1;
        self.next.lock().clone().map_err(Error::Fetch)
    }
}

/// Records every status update; can be told to fail.
#[derive(Default)]
pub struct RecordingStatus {
    pub updates: Mutex<Vec<Option<String>>>,
    pub failing: AtomicBool,
}

impl RecordingStatus {
    pub fn updates(&self) -> Vec<Option<String>> {
        self.updates.lock().clone()
    }
}

#[async_trait]
impl StatusReporter for RecordingStatus {
    async fn notify_status(&self, text: Option<String>) -> Result<(), Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Platform("gateway closed".into()));
        }
        self.updates.lock().push(text);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingResponder {
    pub replies: Mutex<Vec<CommandReply>>,
}

impl RecordingResponder {
    pub fn only_reply(&self) -> CommandReply {
        let replies = self.replies.lock();
        assert_eq!(replies.len(), 1, "expected exactly one reply, got {:?}", *replies);
        replies[0].clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn respond(&self, reply: CommandReply) -> Result<(), Error> {
        self.replies.lock().push(reply);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingVoice {
    pub joins: Mutex<Vec<(u64, u64)>>,
    pub leaves: Mutex<Vec<u64>>,
    pub refuse_join: AtomicBool,
}

#[async_trait]
impl VoiceControl for RecordingVoice {
    async fn join(&self, guild_id: u64, channel_id: u64) -> Result<(), Error> {
        if self.refuse_join.load(Ordering::SeqCst) {
            return Err(Error::Platform("missing permissions".into()));
        }
        self.joins.lock().push((guild_id, channel_id));
        Ok(())
    }

    async fn leave(&self, guild_id: u64) -> Result<(), Error> {
        self.leaves.lock().push(guild_id);
        Ok(())
    }
}

/// Canned HTTP responses keyed by URL prefix; every request is logged.
#[derive(Default)]
pub struct StubHttp {
    routes: Mutex<Vec<(String, Result<String, String>)>>,
    pub requests: Mutex<Vec<String>>,
}

impl StubHttp {
    pub fn route(&self, prefix: &str, body: &str) {
        self.set(prefix, Ok(body.to_string()));
    }

    pub fn route_error(&self, prefix: &str, reason: &str) {
        self.set(prefix, Err(reason.to_string()));
    }

    fn set(&self, prefix: &str, response: Result<String, String>) {
        let mut routes = self.routes.lock();
        routes.retain(|(p, _)| p != prefix);
        routes.push((prefix.to_string(), response));
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests.lock().iter().filter(|u| u.starts_with(prefix)).count()
    }

    fn answer(&self, url: String) -> Result<String, Error> {
        self.requests.lock().push(url.clone());
        self.routes
            .lock()
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, r)| r.clone().map_err(Error::Fetch))
            .unwrap_or_else(|| Err(Error::Fetch(format!("no route for {url}"))))
    }
}

#[async_trait]
impl HttpClient for StubHttp {
    type Error = Error;

    async fn get(&self, url: String, _headers: HashMap<String, String>) -> Result<String, Error> {
        self.answer(url)
    }

    async fn post_form(
        &self,
        url: String,
        _headers: HashMap<String, String>,
        _form: Vec<(String, String)>,
    ) -> Result<String, Error> {
        self.answer(url)
    }
}

pub fn sample_track(name: &str) -> EnrichedTrack {
    EnrichedTrack {
        name: name.to_string(),
        artists: vec!["Some Artist".into()],
        album: "Some Album".into(),
        release_date: "2020-01-01".into(),
        cover_image_url: Some("https://i.scdn.co/image/cover".into()),
        catalog_url: Some("https://open.spotify.com/track/abc".into()),
    }
}

/// A context with capacity-50 history, Athens time and no catalog.
pub fn context(
    title_source: Option<Arc<dyn TitleSource>>,
    keyword: Option<&str>,
    status: Arc<RecordingStatus>,
) -> Arc<RadioContext> {
    context_with_enricher(title_source, keyword, status, CatalogEnricher::disabled())
}

pub fn context_with_enricher(
    title_source: Option<Arc<dyn TitleSource>>,
    keyword: Option<&str>,
    status: Arc<RecordingStatus>,
    enricher: CatalogEnricher,
) -> Arc<RadioContext> {
    Arc::new(RadioContext::new(
        HistoryStore::new(50),
        enricher,
        title_source,
        keyword.map(str::to_string),
        chrono_tz::Europe::Athens,
        status,
    ))
}
