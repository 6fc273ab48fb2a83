use std::sync::Arc;
use std::time::Duration;

use url::Url;
use wallgrab_core::{page_url, update, CrawlReport, CrawlState, Effect, Msg, StopReason, Whitelist};
use wallgrab_logging::{wg_error, wg_info};

use crate::ListingFetcher;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CrawlError {
    #[error("first listing page could not be fetched: {message}")]
    FirstPageFailed { message: String },
}

/// Sequential pagination over a listing, driven by [`wallgrab_core::update`].
pub struct Crawler {
    listing: Arc<dyn ListingFetcher>,
    base_url: Url,
    whitelist: Whitelist,
    max_pages: u32,
    page_size: u32,
    page_delay: Duration,
}

impl Crawler {
    pub fn new(
        listing: Arc<dyn ListingFetcher>,
        base_url: Url,
        whitelist: Whitelist,
        max_pages: u32,
        page_size: u32,
        page_delay: Duration,
    ) -> Self {
        Self {
            listing,
            base_url,
            whitelist,
            max_pages,
            page_size,
            page_delay,
        }
    }

    /// Crawls pages newer than `watermark` and returns every matched entry.
    ///
    /// A failure on a later page ends pagination but keeps what was matched
    /// so far; a failure on the first page is an error.
    pub async fn crawl(&self, watermark: i64) -> Result<CrawlReport, CrawlError> {
        let state = CrawlState::new(watermark, self.whitelist.clone(), self.max_pages);
        let (mut state, mut effects) = update(state, Msg::Start);

        // Every transition yields at most one effect.
        while let Some(effect) = effects.pop() {
            let msg = match effect {
                Effect::FetchPage { page, cursor } => {
                    let url = page_url(&self.base_url, self.page_size, cursor.as_deref());
                    wg_info!("Fetching page {} ({})", page, url);
                    match self.listing.fetch_page(&url).await {
                        Ok(parsed) => {
                            let matched_before = state.matched().len();
                            let total = parsed.entries.len();
                            let msg = Msg::PageLoaded {
                                entries: parsed.entries,
                                issues: parsed.issues,
                            };
                            let (next, next_effects) = update(state, msg);
                            wg_info!(
                                "Page {} has {} good images out of {} entries",
                                page,
                                next.matched().len() - matched_before,
                                total
                            );
                            state = next;
                            effects = next_effects;
                            continue;
                        }
                        Err(err) => {
                            wg_error!("Page {} failed: {}", page, err);
                            Msg::PageFailed {
                                message: err.to_string(),
                            }
                        }
                    }
                }
                Effect::Pause => {
                    tokio::time::sleep(self.page_delay).await;
                    Msg::PauseElapsed
                }
                Effect::Finish { reason } => {
                    wg_info!(
                        "Stopped fetching after {} pages: {}",
                        state.pages_fetched(),
                        reason
                    );
                    break;
                }
            };
            (state, effects) = update(state, msg);
        }

        let report = state.into_report();
        if let Some(StopReason::FetchFailed { message, .. }) = &report.stop_reason {
            if report.pages_fetched == 0 {
                return Err(CrawlError::FirstPageFailed {
                    message: message.clone(),
                });
            }
        }
        Ok(report)
    }
}
