// src/config.rs
//! Service configuration: env vars first, then an optional TOML file.
//!
//! A missing feed URL is a valid configuration (the service runs with
//! an empty feed), so loading never fails on absent values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::broadcast::DEFAULT_POLL_INTERVAL;

pub const ENV_FEED_URL: &str = "UPDATES_FEED_URL";
pub const ENV_POLL_SECS: &str = "UPDATES_POLL_SECS";
pub const ENV_BIND_ADDR: &str = "UPDATES_BIND_ADDR";

const DEFAULT_CONFIG_PATH: &str = "config/feed.toml";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Published-sheet CSV export URL. `None` means "empty feed".
    pub feed_url: Option<String>,
    pub poll_interval: Duration,
    pub bind_addr: SocketAddr,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("valid default bind addr"),
        }
    }
}

/// On-disk shape of `config/feed.toml`; every key optional.
#[derive(Debug, Default, serde::Deserialize)]
struct FileConfig {
    url: Option<String>,
    poll_secs: Option<u64>,
    bind_addr: Option<String>,
}

fn parse_file(content: &str) -> Result<FileConfig> {
    toml::from_str(content).context("parsing feed config TOML")
}

impl FeedConfig {
    /// Resolve config: start from the TOML file (if present), then let
    /// env vars override per key.
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    fn load_from(path: &Path) -> Self {
        let file = match std::fs::read_to_string(path) {
            Ok(content) => match parse_file(&content) {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!(error = ?e, path = %path.display(), "ignoring unreadable feed config");
                    FileConfig::default()
                }
            },
            Err(_) => FileConfig::default(),
        };

        let mut cfg = FeedConfig {
            feed_url: file.url,
            ..FeedConfig::default()
        };
        if let Some(secs) = file.poll_secs {
            cfg.poll_interval = Duration::from_secs(secs);
        }
        if let Some(addr) = file.bind_addr.as_deref().and_then(|a| a.parse().ok()) {
            cfg.bind_addr = addr;
        }

        if let Ok(url) = std::env::var(ENV_FEED_URL) {
            let url = url.trim().to_string();
            cfg.feed_url = (!url.is_empty()).then_some(url);
        }
        if let Some(secs) = std::env::var(ENV_POLL_SECS)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            cfg.poll_interval = Duration::from_secs(secs);
        }
        if let Some(addr) = std::env::var(ENV_BIND_ADDR)
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            cfg.bind_addr = addr;
        }

        cfg
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}
