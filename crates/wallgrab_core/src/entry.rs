use std::fmt;

use crate::tags::extract_tags;

/// A single listing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Opaque, non-empty identifier; filename stem and pagination cursor.
    pub id: String,
    pub source_url: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub title: String,
    /// Derived from `title`; sorted, deduplicated.
    pub tags: Vec<String>,
}

impl Entry {
    pub fn new(
        id: impl Into<String>,
        source_url: impl Into<String>,
        timestamp: i64,
        title: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let tags = extract_tags(&title);
        Self {
            id: id.into(),
            source_url: source_url.into(),
            timestamp,
            title,
            tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    MissingId,
    MissingUrl,
    MissingTimestamp,
    InvalidTimestamp { raw: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::MissingId => write!(f, "missing id"),
            IssueKind::MissingUrl => write!(f, "missing url"),
            IssueKind::MissingTimestamp => write!(f, "missing timestamp"),
            IssueKind::InvalidTimestamp { raw } => write!(f, "invalid timestamp {raw:?}"),
        }
    }
}

/// A listing block that was rejected or only partially usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIssue {
    /// Zero-based position of the block on its page.
    pub position: usize,
    pub entry_id: Option<String>,
    pub kind: IssueKind,
}

impl EntryIssue {
    /// Rejected blocks never become entries; the rest are kept with defaulted fields.
    pub fn is_rejected(&self) -> bool {
        matches!(self.kind, IssueKind::MissingId)
    }
}

impl fmt::Display for EntryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.is_rejected() { "rejected" } else { "degraded" };
        match &self.entry_id {
            Some(id) => write!(f, "block {} ({id}) {outcome}: {}", self.position, self.kind),
            None => write!(f, "block {} {outcome}: {}", self.position, self.kind),
        }
    }
}
