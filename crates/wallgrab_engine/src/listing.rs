use std::sync::Arc;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use scraper::{ElementRef, Html, Selector};
use url::Url;
use wallgrab_core::{Entry, EntryIssue, IssueKind};
use wallgrab_logging::{wg_debug, wg_warn};

use crate::{FetchError, Fetcher};

const ENTRY_SELECTOR: &str = "#siteTable .thing";
const TITLE_SELECTOR: &str = "a.title";
const ID_ATTR: &str = "data-fullname";
const URL_ATTR: &str = "data-url";
const TIMESTAMP_ATTR: &str = "data-timestamp";

/// Entries of one listing page, newest first, plus the blocks that were
/// rejected or degraded while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPage {
    pub entries: Vec<Entry>,
    pub issues: Vec<EntryIssue>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to decode page with {encoding}")]
    Decode { encoding: String },
    #[error("invalid selector {selector}: {message}")]
    Selector { selector: String, message: String },
}

#[async_trait::async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<ParsedPage, ListingError>;
}

/// Fetches listing pages over HTTP and parses them as HTML.
pub struct HtmlListingFetcher {
    fetcher: Arc<dyn Fetcher>,
}

impl HtmlListingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl ListingFetcher for HtmlListingFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<ParsedPage, ListingError> {
        let output = self.fetcher.fetch(url.as_str()).await?;
        let html = decode_page(&output.bytes, output.metadata.content_type.as_deref())?;
        let page = parse_listing(&html)?;
        wg_debug!(
            "Parsed {} entries ({} issues) from {}",
            page.entries.len(),
            page.issues.len(),
            url
        );
        Ok(page)
    }
}

/// Parses the entry blocks of a listing document, in document order.
///
/// A block without an id is rejected. Missing or malformed url and
/// timestamp attributes default to empty and 0 and are reported as issues.
pub fn parse_listing(html: &str) -> Result<ParsedPage, ListingError> {
    let entry_sel = selector(ENTRY_SELECTOR)?;
    let title_sel = selector(TITLE_SELECTOR)?;
    let doc = Html::parse_document(html);

    let mut page = ParsedPage::default();
    for (position, block) in doc.select(&entry_sel).enumerate() {
        let mut report = |entry_id: Option<&str>, kind: IssueKind| {
            let issue = EntryIssue {
                position,
                entry_id: entry_id.map(ToOwned::to_owned),
                kind,
            };
            wg_warn!("Listing {issue}");
            page.issues.push(issue);
        };

        let Some(id) = attr(block, ID_ATTR) else {
            report(None, IssueKind::MissingId);
            continue;
        };

        let source_url = attr(block, URL_ATTR).unwrap_or_else(|| {
            report(Some(id), IssueKind::MissingUrl);
            ""
        });

        let timestamp = match attr(block, TIMESTAMP_ATTR) {
            None => {
                report(Some(id), IssueKind::MissingTimestamp);
                0
            }
            Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
                report(
                    Some(id),
                    IssueKind::InvalidTimestamp {
                        raw: raw.to_string(),
                    },
                );
                0
            }),
        };

        let title = block
            .select(&title_sel)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        page.entries
            .push(Entry::new(id, source_url, timestamp, title));
    }

    Ok(page)
}

fn selector(source: &str) -> Result<Selector, ListingError> {
    Selector::parse(source).map_err(|err| ListingError::Selector {
        selector: source.to_string(),
        message: err.to_string(),
    })
}

fn attr<'a>(block: ElementRef<'a>, name: &str) -> Option<&'a str> {
    block
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Decode raw bytes into UTF-8: BOM, then Content-Type charset, then chardetng.
fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<String, ListingError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ListingError::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}
