//! Wallgrab engine: listing transport, crawl driver, download fan-out and watermark persistence.
mod config;
mod crawler;
mod download;
mod engine;
mod fetch;
mod filename;
mod listing;
mod persist;
mod summary;
mod types;
mod watermark;

pub use config::{CrawlerConfig, DEFAULT_BASE_URL};
pub use crawler::{CrawlError, Crawler};
pub use download::{DownloadError, DownloadFailure, DownloadReport, Downloader, SavedImage};
pub use engine::{system_clock, Clock, Engine, RunError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filename::image_filename;
pub use listing::{parse_listing, HtmlListingFetcher, ListingError, ListingFetcher, ParsedPage};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use summary::RunSummary;
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
pub use watermark::{WatermarkError, WatermarkStore};
