//! Regulatory feed fetching.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::FetchedDocument;

/// Fetches the text of a regulatory feed.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetches `url`, failing with `FetchFailure` on any transport error or
    /// unsuccessful response.
    async fn fetch(&self, url: &str) -> EngineResult<FetchedDocument>;
}

/// Feed fetcher over HTTP GET with a request timeout.
///
/// JSON responses take their text from the first non-empty string among
/// `content`, `text` and `body` (falling back to the whole document) and
/// their title from `title` or `headline`. Any other response body is used
/// verbatim and titled with the URL.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::FetchFailure {
                url: String::new(),
                message: format!("could not build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> EngineResult<FetchedDocument> {
        debug!(url = %url, "Fetching regulatory feed");

        let failure = |message: String| EngineError::FetchFailure {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("status {}", status)));
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let body = response.text().await.map_err(|e| failure(e.to_string()))?;

        let (title, text) = if is_json {
            let document: Value = serde_json::from_str(&body)
                .map_err(|e| failure(format!("invalid JSON body: {}", e)))?;
            json_title_and_text(&document, url)
        } else {
            (url.to_string(), body)
        };

        Ok(FetchedDocument {
            url: url.to_string(),
            title,
            text,
            fetched_at: Utc::now(),
        })
    }
}

fn first_string(document: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| document.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn json_title_and_text(document: &Value, url: &str) -> (String, String) {
    let text = first_string(document, &["content", "text", "body"])
        .unwrap_or_else(|| document.to_string());
    let title = first_string(document, &["title", "headline"]).unwrap_or_else(|| url.to_string());
    (title, text)
}
