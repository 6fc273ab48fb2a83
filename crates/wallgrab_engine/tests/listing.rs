use std::sync::Arc;

use pretty_assertions::assert_eq;
use url::Url;
use wallgrab_core::{Entry, IssueKind};
use wallgrab_engine::{
    parse_listing, FetchSettings, HtmlListingFetcher, ListingFetcher, ReqwestFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"
<html><body>
<div id="siteTable">
  <div class="thing link" data-fullname="t3_new" data-url="https://i.example.com/new.png" data-timestamp="1700000002000">
    <p class="title"><a class="title" href="/r/x/1">Screenshot[awesome] Triple monitor [i3|polybar]</a></p>
  </div>
  <div class="thing link" data-fullname="t3_old" data-url="https://example.com/gallery/old" data-timestamp="1700000001000">
    <p class="title"><a class="title" href="/r/x/2">  no tags here  </a></p>
  </div>
</div>
<div class="thing" data-fullname="t3_outside" data-url="https://i.example.com/o.png" data-timestamp="1"></div>
</body></html>
"#;

#[test]
fn parses_entry_blocks_in_document_order() {
    wallgrab_logging::initialize_for_tests();
    let page = parse_listing(LISTING).unwrap();

    assert_eq!(
        page.entries,
        vec![
            Entry::new(
                "t3_new",
                "https://i.example.com/new.png",
                1_700_000_002_000,
                "Screenshot[awesome] Triple monitor [i3|polybar]",
            ),
            Entry::new(
                "t3_old",
                "https://example.com/gallery/old",
                1_700_000_001_000,
                "no tags here",
            ),
        ]
    );
    assert_eq!(page.entries[0].tags, vec!["awesome", "i3", "polybar"]);
    assert!(page.issues.is_empty());
}

#[test]
fn missing_id_rejects_block_and_other_attributes_degrade() {
    wallgrab_logging::initialize_for_tests();
    let html = r#"
    <div id="siteTable">
      <div class="thing" data-url="https://i.example.com/a.png" data-timestamp="5"><a class="title">[i3]</a></div>
      <div class="thing" data-fullname="t3_b" data-timestamp="soon"><a class="title">[dwm]</a></div>
      <div class="thing" data-fullname="t3_c" data-url="https://i.example.com/c.png"></div>
    </div>
    "#;

    let page = parse_listing(html).unwrap();

    let ids: Vec<_> = page.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["t3_b", "t3_c"]);
    assert_eq!(page.entries[0].source_url, "");
    assert_eq!(page.entries[0].timestamp, 0);
    assert_eq!(page.entries[1].timestamp, 0);
    assert_eq!(page.entries[1].title, "");

    let kinds: Vec<_> = page.issues.iter().map(|i| (i.position, i.kind.clone())).collect();
    assert_eq!(
        kinds,
        vec![
            (0, IssueKind::MissingId),
            (1, IssueKind::MissingUrl),
            (
                1,
                IssueKind::InvalidTimestamp {
                    raw: "soon".to_string()
                }
            ),
            (2, IssueKind::MissingTimestamp),
        ]
    );
    assert!(page.issues[0].is_rejected());
    assert!(!page.issues[1].is_rejected());
}

#[test]
fn page_without_blocks_is_empty() {
    let page = parse_listing("<html><body><p>nothing</p></body></html>").unwrap();
    assert!(page.entries.is_empty());
    assert!(page.issues.is_empty());
}

#[tokio::test]
async fn html_listing_fetcher_reads_a_served_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/unixporn/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()).unwrap());
    let listing = HtmlListingFetcher::new(fetcher);
    let url = Url::parse(&format!("{}/r/unixporn/new/", server.uri())).unwrap();

    let page = listing.fetch_page(&url).await.unwrap();
    assert_eq!(page.entries.len(), 2);
    assert_eq!(page.entries[1].id, "t3_old");
}
