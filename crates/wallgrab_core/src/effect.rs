use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch listing page `page`; `cursor` is `None` for the first page.
    FetchPage { page: u32, cursor: Option<String> },
    /// Sleep for the inter-page delay, then send `Msg::PauseElapsed`.
    Pause,
    /// Pagination is over.
    Finish { reason: StopReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The oldest entry on the last page is not newer than the watermark.
    CaughtUp,
    PageCeiling { max_pages: u32 },
    /// A page without entries has no cursor to continue from.
    EmptyPage,
    FetchFailed { page: u32, message: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::CaughtUp => write!(f, "caught up with watermark"),
            StopReason::PageCeiling { max_pages } => {
                write!(f, "page ceiling of {max_pages} reached")
            }
            StopReason::EmptyPage => write!(f, "empty page"),
            StopReason::FetchFailed { page, message } => {
                write!(f, "page {page} failed: {message}")
            }
        }
    }
}
