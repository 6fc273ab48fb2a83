use crate::{filter_entries, Entry, EntryIssue, SkippedTags, StopReason, Whitelist};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CrawlPhase {
    #[default]
    Idle,
    Fetching,
    /// Waiting out the inter-page delay before the next fetch.
    Continue,
    Stopped(StopReason),
}

/// An entry issue together with the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIssue {
    pub page: u32,
    pub issue: EntryIssue,
}

/// Everything the crawl produced once pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub matched: Vec<Entry>,
    pub skipped: SkippedTags,
    pub issues: Vec<PageIssue>,
    pub pages_fetched: u32,
    pub entries_seen: usize,
    /// `None` only when the crawl never stopped.
    pub stop_reason: Option<StopReason>,
}

/// Pagination state for one run. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    watermark: i64,
    max_pages: u32,
    whitelist: Whitelist,
    phase: CrawlPhase,
    page: u32,
    cursor: Option<String>,
    pages_fetched: u32,
    entries_seen: usize,
    matched: Vec<Entry>,
    skipped: SkippedTags,
    issues: Vec<PageIssue>,
}

impl CrawlState {
    pub fn new(watermark: i64, whitelist: Whitelist, max_pages: u32) -> Self {
        Self {
            watermark,
            max_pages,
            whitelist,
            phase: CrawlPhase::Idle,
            page: 0,
            cursor: None,
            pages_fetched: 0,
            entries_seen: 0,
            matched: Vec::new(),
            skipped: SkippedTags::new(),
            issues: Vec::new(),
        }
    }

    pub fn phase(&self) -> &CrawlPhase {
        &self.phase
    }

    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Current page number, 1-based; 0 before the crawl starts.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn matched(&self) -> &[Entry] {
        &self.matched
    }

    pub fn skipped(&self) -> &SkippedTags {
        &self.skipped
    }

    pub fn issues(&self) -> &[PageIssue] {
        &self.issues
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.phase, CrawlPhase::Stopped(_))
    }

    pub fn into_report(self) -> CrawlReport {
        let stop_reason = match self.phase {
            CrawlPhase::Stopped(reason) => Some(reason),
            _ => None,
        };
        CrawlReport {
            matched: self.matched,
            skipped: self.skipped,
            issues: self.issues,
            pages_fetched: self.pages_fetched,
            entries_seen: self.entries_seen,
            stop_reason,
        }
    }

    pub(crate) fn begin_page(&mut self, page: u32) {
        self.page = page;
        self.phase = CrawlPhase::Fetching;
    }

    pub(crate) fn set_phase(&mut self, phase: CrawlPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    pub(crate) fn record_page(&mut self, entry_count: usize, issues: Vec<EntryIssue>) {
        self.pages_fetched += 1;
        self.entries_seen += entry_count;
        let page = self.page;
        self.issues
            .extend(issues.into_iter().map(|issue| PageIssue { page, issue }));
    }

    /// Filters a page against the watermark and whitelist and keeps the matches.
    /// Returns how many entries matched.
    pub(crate) fn accept_page(&mut self, entries: &[Entry]) -> usize {
        let matched = filter_entries(entries, self.watermark, &self.whitelist, &mut self.skipped);
        let count = matched.len();
        self.matched.extend(matched);
        count
    }
}
