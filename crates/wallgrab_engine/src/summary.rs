use std::fmt;

use wallgrab_core::{PageIssue, StopReason};

use crate::DownloadReport;

/// End-of-run report shown to the user.
#[derive(Debug)]
pub struct RunSummary {
    pub previous_watermark: i64,
    pub new_watermark: i64,
    pub pages_fetched: u32,
    pub entries_seen: usize,
    pub stop_reason: Option<StopReason>,
    pub matched: usize,
    pub downloads: DownloadReport,
    /// Sorted ascending.
    pub skipped_tags: Vec<String>,
    pub issues: Vec<PageIssue>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--=[ DOWNLOAD FINISHED ]=--")?;
        match &self.stop_reason {
            Some(reason) => writeln!(f, "pages fetched: {} ({reason})", self.pages_fetched)?,
            None => writeln!(f, "pages fetched: {}", self.pages_fetched)?,
        }
        writeln!(
            f,
            "entries seen: {}, matched: {}",
            self.entries_seen, self.matched
        )?;
        writeln!(
            f,
            "downloaded: {}, failed: {}",
            self.downloads.saved.len(),
            self.downloads.failures.len()
        )?;
        for failure in &self.downloads.failures {
            writeln!(
                f,
                "  {} ({}): {}",
                failure.entry_id, failure.source_url, failure.error
            )?;
        }
        if !self.issues.is_empty() {
            writeln!(f, "listing issues: {}", self.issues.len())?;
            for PageIssue { page, issue } in &self.issues {
                writeln!(f, "  page {page}: {issue}")?;
            }
        }
        writeln!(f, "skipped tags: [{}]", self.skipped_tags.join(", "))?;
        write!(
            f,
            "watermark: {} -> {}",
            self.previous_watermark, self.new_watermark
        )
    }
}
