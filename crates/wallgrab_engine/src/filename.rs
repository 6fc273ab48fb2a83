use wallgrab_core::{Entry, ACCEPTED_IMAGE_EXTENSION};

/// Destination filename for an entry: `{id} [{tag1},{tag2},...].png`.
///
/// Tags keep their sorted order. Characters that are not allowed in file
/// names are replaced with `_`; the same entry always maps to the same name.
pub fn image_filename(entry: &Entry) -> String {
    let id = sanitize(&entry.id);
    let tags = entry
        .tags
        .iter()
        .map(|tag| sanitize(tag))
        .collect::<Vec<_>>()
        .join(",");
    format!("{id} [{tags}]{ACCEPTED_IMAGE_EXTENSION}")
}

fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
