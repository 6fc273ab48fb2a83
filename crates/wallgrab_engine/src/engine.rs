use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use url::Url;
use wallgrab_core::Whitelist;
use wallgrab_logging::{wg_info, wg_warn};

use crate::{
    ensure_output_dir, AtomicFileWriter, CrawlError, Crawler, CrawlerConfig, Downloader,
    FetchError, HtmlListingFetcher, PersistError, ReqwestFetcher, RunSummary, WatermarkError,
    WatermarkStore,
};

/// Source of "now" in milliseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| Utc::now().timestamp_millis())
}

/// Errors that abort a run before the watermark is advanced.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error(transparent)]
    Watermark(#[from] WatermarkError),
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error("images directory unusable: {0}")]
    ImagesDir(#[from] PersistError),
    #[error("http client could not be built: {0}")]
    Client(#[from] FetchError),
    #[error("async runtime could not be started: {0}")]
    Runtime(#[from] std::io::Error),
}

/// One incremental run: load watermark, crawl, download, save watermark.
pub struct Engine {
    crawler: Crawler,
    downloader: Downloader,
    watermark: WatermarkStore,
    images_dir: PathBuf,
    clock: Clock,
}

impl Engine {
    pub fn new(config: &CrawlerConfig) -> Result<Self, RunError> {
        let base_url = Url::parse(&config.base_url).map_err(|err| RunError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: err.to_string(),
        })?;

        let listing_fetcher = Arc::new(ReqwestFetcher::new(config.listing_fetch_settings())?);
        let image_fetcher = Arc::new(ReqwestFetcher::new(config.image_fetch_settings())?);

        let crawler = Crawler::new(
            Arc::new(HtmlListingFetcher::new(listing_fetcher)),
            base_url,
            Whitelist::new(&config.whitelist),
            config.max_pages,
            config.page_size,
            config.page_delay(),
        );
        let downloader = Downloader::new(
            image_fetcher,
            AtomicFileWriter::new(config.images_dir.clone()),
            config.max_concurrent_downloads,
        );

        Ok(Self::from_parts(
            crawler,
            downloader,
            WatermarkStore::new(config.watermark_path.clone()),
            config.images_dir.clone(),
            system_clock(),
        ))
    }

    pub fn from_parts(
        crawler: Crawler,
        downloader: Downloader,
        watermark: WatermarkStore,
        images_dir: PathBuf,
        clock: Clock,
    ) -> Self {
        Self {
            crawler,
            downloader,
            watermark,
            images_dir,
            clock,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn run(&self) -> Result<RunSummary, RunError> {
        let previous_watermark = self.watermark.load()?;
        ensure_output_dir(&self.images_dir)?;

        let report = self.crawler.crawl(previous_watermark).await?;
        let matched = report.matched.len();
        wg_info!("Downloading {} images", matched);

        let downloads = self.downloader.download_all(report.matched).await;
        if !downloads.failures.is_empty() {
            wg_warn!(
                "{} of {} downloads failed",
                downloads.failures.len(),
                downloads.attempted()
            );
        }

        let new_watermark = (self.clock)();
        self.watermark.save(new_watermark)?;

        Ok(RunSummary {
            previous_watermark,
            new_watermark,
            pages_fetched: report.pages_fetched,
            entries_seen: report.entries_seen,
            stop_reason: report.stop_reason,
            matched,
            downloads,
            skipped_tags: report.skipped.into_vec(),
            issues: report.issues,
        })
    }

    /// Runs on a fresh multi-threaded tokio runtime.
    pub fn run_blocking(&self) -> Result<RunSummary, RunError> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.run())
    }
}
