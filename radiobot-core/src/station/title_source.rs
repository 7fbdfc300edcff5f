// File: radiobot-core/src/station/title_source.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

use radiobot_common::traits::api::TitleSource;
use crate::http::HttpClient;
use crate::Error;

/// Container key the Icecast status document groups its mount points under.
const ICESTATS_KEY: &str = "icestats";

/// Reads the current title from an Icecast `status-json.xsl` style endpoint.
pub struct IcecastTitleSource {
    http: Arc<dyn HttpClient<Error = Error>>,
    endpoint: String,
}

impl IcecastTitleSource {
    pub fn new(http: Arc<dyn HttpClient<Error = Error>>, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TitleSource for IcecastTitleSource {
    async fn fetch_title(&self) -> Result<Option<String>, Error> {
        let body = self.http.get(self.endpoint.clone(), HashMap::new()).await?;
        trace!("(IcecastTitleSource) {} bytes from {}", body.len(), self.endpoint);
        let title = parse_icestats_title(&body)?;
        debug!("(IcecastTitleSource) current title => {:?}", title);
        Ok(title)
    }
}

/// Extract the first mount-point title from an Icecast status document and
/// display-capitalize it.
///
/// Each value under `icestats` is searched in order; an object carrying a
/// `title` member wins. When several mounts are present Icecast emits an array
/// under `source`, and its elements are searched in order too.
pub fn parse_icestats_title(body: &str) -> Result<Option<String>, Error> {
    let doc: Value = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("station metadata is not valid JSON: {e}")))?;

    let root = doc
        .as_object()
        .ok_or_else(|| Error::Parse("station metadata is not a JSON object".into()))?;

    let Some(container) = root.get(ICESTATS_KEY).and_then(Value::as_object) else {
        return Ok(None);
    };

    for value in container.values() {
        let found = match value {
            Value::Object(_) => title_of(value)?,
            Value::Array(mounts) => {
                let mut first = None;
                for mount in mounts {
                    if let Some(t) = title_of(mount)? {
                        first = Some(t);
                        break;
                    }
                }
                first
            }
            _ => None,
        };
        if let Some(raw) = found {
            if raw.is_empty() {
                return Ok(None);
            }
            return Ok(Some(title_case(&raw)));
        }
    }

    Ok(None)
}

fn title_of(mount: &Value) -> Result<Option<String>, Error> {
    match mount.get("title") {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) => Ok(Some(String::new())),
        Some(other) => Err(Error::Parse(format!("unexpected title value: {other}"))),
    }
}

/// Upper-case a cased letter that follows a non-letter, lower-case one that
/// follows a letter. Whitespace and punctuation are left untouched, so
/// `"hello   world"` becomes `"Hello   World"` and `"don't"` becomes `"Don'T"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}
