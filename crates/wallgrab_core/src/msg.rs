use crate::{Entry, EntryIssue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the crawl at page 1.
    Start,
    /// The requested page was fetched and parsed.
    PageLoaded {
        entries: Vec<Entry>,
        issues: Vec<EntryIssue>,
    },
    /// The requested page could not be fetched or parsed.
    PageFailed { message: String },
    /// The inter-page pause is over.
    PauseElapsed,
}
