// src/feed/source.rs
//! Where the CSV text comes from: live HTTP for production, in-memory
//! text for tests and fixtures.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL, PRAGMA};

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current CSV body. Errors here are fetch-level: the
    /// broadcaster logs them and keeps its last-known-good list.
    async fn fetch_csv(&self) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Live source: GET against the published-sheet URL with caching
/// disabled, since the sheet is expected to change between cycles.
pub struct HttpFeedSource {
    url: String,
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_csv(&self) -> Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"))
            .header(PRAGMA, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .context("requesting updates feed")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("updates feed returned {status}");
        }
        resp.text().await.context("reading updates feed body")
    }

    fn name(&self) -> &'static str {
        "sheet-http"
    }
}

/// Fixed in-memory CSV, for tests and offline fixtures.
pub struct StaticFeedSource {
    csv: String,
}

impl StaticFeedSource {
    pub fn new(csv: impl Into<String>) -> Self {
        Self { csv: csv.into() }
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch_csv(&self) -> Result<String> {
        Ok(self.csv.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
