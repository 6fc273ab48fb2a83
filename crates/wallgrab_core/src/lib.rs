//! Wallgrab core: tag parsing, entry filtering and the pure pagination state machine.
mod cursor;
mod effect;
mod entry;
mod filter;
mod msg;
mod state;
mod tags;
mod update;
mod whitelist;

pub use cursor::page_url;
pub use effect::{Effect, StopReason};
pub use entry::{Entry, EntryIssue, IssueKind};
pub use filter::{filter_entries, is_accepted_image, SkippedTags, ACCEPTED_IMAGE_EXTENSION};
pub use msg::Msg;
pub use state::{CrawlPhase, CrawlReport, CrawlState, PageIssue};
pub use tags::extract_tags;
pub use update::update;
pub use whitelist::{find_element, Whitelist, DEFAULT_WHITELIST};
