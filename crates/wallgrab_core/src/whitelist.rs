/// Tags accepted when no whitelist is configured.
pub const DEFAULT_WHITELIST: &[&str] = &[
    "2bwm",
    "4dwm",
    "9wm",
    "awesome",
    "awesomewm",
    "bspwm",
    "chunkwm",
    "cinnamon",
    "cwm",
    "dwm",
    "evilwm",
    "exwm",
    "gaps",
    "frankenwm",
    "fvwm",
    "hlwm",
    "herbstluftwm",
    "i3",
    "i3gaps",
    "i3-gaps",
    "i3wm",
    "i3-wm",
    "icewm",
    "lxqt",
    "manjaro",
    "mate",
    "pekwm",
    "qtile",
    "spectrwm",
    "sway",
    "eveningwm",
    "termux",
    "twm",
    "uwurawrxdwm",
    "vtwm",
    "xfce",
    "windowmaker",
];

/// Immutable set of accepted tags, normalized and sorted once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    tags: Vec<String>,
}

impl Whitelist {
    /// Tags are trimmed and lowercased; empty ones are dropped.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        Self { tags }
    }

    /// The whitelist built from [`DEFAULT_WHITELIST`].
    pub fn builtin() -> Self {
        Self::new(DEFAULT_WHITELIST)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_some()
    }

    /// Index of `tag` in sorted order.
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)).ok()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

/// Sorts `items` byte-wise in place and returns the lowest index of `text`.
///
/// Prefer [`Whitelist`] for repeated lookups; this re-sorts on every call.
pub fn find_element(items: &mut [String], text: &str) -> Option<usize> {
    items.sort();
    let location = items.partition_point(|item| item.as_str() < text);
    match items.get(location) {
        Some(item) if item == text => Some(location),
        _ => None,
    }
}
