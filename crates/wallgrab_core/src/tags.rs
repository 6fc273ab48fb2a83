use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Leftmost, non-recursive: `[a [b]` yields the group `a [b`.
    static ref TAG_GROUP: Regex = Regex::new(r"\[([^\]]+)\]").expect("tag group pattern");
}

const SEPARATORS: &[char] = &[' ', '+', '|', '/'];

/// Extracts the bracketed tag annotations of a title.
///
/// Every `[...]` group contributes its tokens, split on space, `+`, `|` and `/`.
/// Tokens are trimmed and lowercased; the result is sorted ascending with no
/// duplicates and no empty strings.
///
/// ```
/// use wallgrab_core::extract_tags;
///
/// let tags = extract_tags("Screenshot[awesome] Triple monitor [i3|polybar]");
/// assert_eq!(tags, vec!["awesome", "i3", "polybar"]);
/// ```
pub fn extract_tags(title: &str) -> Vec<String> {
    let mut tags = BTreeSet::new();

    for group in TAG_GROUP.captures_iter(title) {
        let interior = group[1].replace('[', "");
        for token in interior.split(SEPARATORS) {
            let token = token.trim().to_lowercase();
            if !token.is_empty() {
                tags.insert(token);
            }
        }
    }

    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_tags_from_every_group() {
        assert_eq!(
            extract_tags("Screenshot[awesome] Triple monitor [i3|polybar]"),
            vec!["awesome", "i3", "polybar"]
        );
    }

    #[test]
    fn title_without_brackets_has_no_tags() {
        assert!(extract_tags("no tags here").is_empty());
    }

    #[test]
    fn separator_runs_count_as_one_boundary() {
        assert_eq!(
            extract_tags("[bspwm + /polybar||  Rofi]"),
            vec!["bspwm", "polybar", "rofi"]
        );
    }

    #[test]
    fn separator_only_and_empty_groups_yield_nothing() {
        assert!(extract_tags("[ + | / ] and []").is_empty());
    }

    #[test]
    fn duplicates_across_groups_collapse() {
        assert_eq!(extract_tags("[i3] rice [I3/sway] [i3]"), vec!["i3", "sway"]);
    }

    #[test]
    fn unmatched_open_bracket_is_folded_into_the_group() {
        assert_eq!(extract_tags("[dwm [st] dots]"), vec!["dwm", "st"]);
        assert!(extract_tags("[dangling").is_empty());
    }

    #[test]
    fn output_is_sorted_without_empty_strings() {
        let titles = [
            "[Zsh|awesome] [ X ]",
            "[ a  b ][c]",
            "plain",
            "[||]",
            "[Xfce/ xfce /XFCE]",
        ];
        for title in titles {
            let tags = extract_tags(title);
            let mut sorted = tags.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(tags, sorted, "title {title:?}");
            assert!(tags.iter().all(|t| !t.is_empty()), "title {title:?}");
        }
    }
}
