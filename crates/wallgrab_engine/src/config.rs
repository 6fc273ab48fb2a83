use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use wallgrab_core::DEFAULT_WHITELIST;

use crate::fetch::{FetchSettings, DEFAULT_USER_AGENT};

pub const DEFAULT_BASE_URL: &str = "https://old.reddit.com/r/unixporn/new/";

/// Run configuration. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlerConfig {
    /// First listing page; later pages add `count` and `after` query parameters.
    pub base_url: String,
    pub whitelist: Vec<String>,
    /// Upper bound on fetched pages.
    pub max_pages: u32,
    /// Pause between two page fetches.
    pub page_delay_secs: u64,
    /// Sent as `count` with the pagination cursor.
    pub page_size: u32,
    pub user_agent: String,
    pub watermark_path: PathBuf,
    pub images_dir: PathBuf,
    /// `None` starts every download at once.
    pub max_concurrent_downloads: Option<usize>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: u64,
    /// Wait for Enter before the process exits.
    pub wait_for_enter: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            whitelist: DEFAULT_WHITELIST.iter().map(|tag| tag.to_string()).collect(),
            max_pages: 15,
            page_delay_secs: 3,
            page_size: 25,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            watermark_path: PathBuf::from("timestamp.txt"),
            images_dir: PathBuf::from("images"),
            max_concurrent_downloads: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_image_bytes: 50 * 1024 * 1024,
            wait_for_enter: true,
        }
    }
}

impl CrawlerConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_secs(self.page_delay_secs)
    }

    pub fn listing_fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn image_fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::for_images(self.max_image_bytes)
        }
    }
}
