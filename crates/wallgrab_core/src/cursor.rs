use url::Url;

/// Listing URL for a page: the base URL alone for the first page, otherwise
/// `count=<page_size>&after=<cursor>` appended to its query.
pub fn page_url(base: &Url, page_size: u32, cursor: Option<&str>) -> Url {
    let mut url = base.clone();
    if let Some(after) = cursor {
        url.query_pairs_mut()
            .append_pair("count", &page_size.to_string())
            .append_pair("after", after);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_is_the_base_url() {
        let base = Url::parse("https://old.reddit.com/r/unixporn/new/").unwrap();
        assert_eq!(page_url(&base, 25, None), base);
    }

    #[test]
    fn cursor_is_appended_as_after() {
        let base = Url::parse("https://old.reddit.com/r/unixporn/new/").unwrap();
        let next = page_url(&base, 25, Some("t3_abc"));
        assert_eq!(
            next.as_str(),
            "https://old.reddit.com/r/unixporn/new/?count=25&after=t3_abc"
        );
    }
}
