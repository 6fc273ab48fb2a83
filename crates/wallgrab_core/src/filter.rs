use std::collections::BTreeSet;

use url::Url;

use crate::{Entry, Whitelist};

/// The only image kind the pipeline downloads.
pub const ACCEPTED_IMAGE_EXTENSION: &str = ".png";

/// Tags seen on candidate entries that are not whitelisted, deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkippedTags {
    tags: BTreeSet<String>,
}

impl SkippedTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the tag was not recorded before.
    pub fn record(&mut self, tag: &str) -> bool {
        if self.tags.contains(tag) {
            return false;
        }
        self.tags.insert(tag.to_string())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Sorted ascending.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags.into_iter().collect()
    }
}

/// Whether the URL path ends with [`ACCEPTED_IMAGE_EXTENSION`], ignoring case,
/// query and fragment.
pub fn is_accepted_image(source_url: &str) -> bool {
    let path = match Url::parse(source_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => source_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.to_ascii_lowercase().ends_with(ACCEPTED_IMAGE_EXTENSION)
}

/// Keeps entries that are accepted images, newer than `watermark` and carry at
/// least one whitelisted tag, in their original order.
///
/// Every non-whitelisted tag of a candidate entry is recorded in `skipped`,
/// whether or not the entry itself is kept. Entries failing the image or
/// recency check are dropped without bookkeeping.
pub fn filter_entries(
    entries: &[Entry],
    watermark: i64,
    whitelist: &Whitelist,
    skipped: &mut SkippedTags,
) -> Vec<Entry> {
    let mut matched = Vec::new();

    for entry in entries {
        if entry.timestamp <= watermark || !is_accepted_image(&entry.source_url) {
            continue;
        }

        let mut is_matched = false;
        for tag in &entry.tags {
            if whitelist.contains(tag) {
                is_matched = true;
            } else {
                skipped.record(tag);
            }
        }

        if is_matched {
            matched.push(entry.clone());
        }
    }

    matched
}
