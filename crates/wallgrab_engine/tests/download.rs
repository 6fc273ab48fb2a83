use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wallgrab_core::Entry;
use wallgrab_engine::{
    AtomicFileWriter, DownloadError, Downloader, FailureKind, FetchError, FetchMetadata,
    FetchOutput, FetchSettings, Fetcher, ReqwestFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves canned bodies and tracks how many fetches run at the same time.
struct CannedFetcher {
    bodies: HashMap<String, Vec<u8>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl CannedFetcher {
    fn new(bodies: &[(&str, &[u8])]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_vec()))
                .collect(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let body = self.bodies.get(url).ok_or_else(|| FetchError {
            kind: FailureKind::HttpStatus(404),
            message: "404 Not Found".to_string(),
        })?;
        Ok(FetchOutput {
            bytes: Bytes::from(body.clone()),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                content_type: Some("image/png".to_string()),
                byte_len: body.len() as u64,
            },
        })
    }
}

fn entry(id: &str, title: &str) -> Entry {
    Entry::new(id, format!("https://i.example.com/{id}.png"), 2_000, title)
}

#[tokio::test]
async fn failures_do_not_stop_other_downloads() {
    wallgrab_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(CannedFetcher::new(&[
        ("https://i.example.com/t3_a.png", &b"aaa"[..]),
        ("https://i.example.com/t3_c.png", &b"c"[..]),
    ]));
    let downloader = Downloader::new(
        fetcher,
        AtomicFileWriter::new(temp.path().to_path_buf()),
        None,
    );

    let report = downloader
        .download_all(vec![
            entry("t3_a", "[i3|polybar]"),
            entry("t3_b", "[dwm]"),
            entry("t3_c", "[sway]"),
        ])
        .await;

    assert_eq!(report.attempted(), 3);
    let saved: Vec<_> = report.saved.iter().map(|s| s.entry_id.as_str()).collect();
    assert_eq!(saved, vec!["t3_a", "t3_c"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entry_id, "t3_b");
    assert!(matches!(
        &report.failures[0].error,
        DownloadError::Fetch(FetchError {
            kind: FailureKind::HttpStatus(404),
            ..
        })
    ));

    assert_eq!(
        fs::read(temp.path().join("t3_a [i3,polybar].png")).unwrap(),
        b"aaa"
    );
    assert_eq!(fs::read(temp.path().join("t3_c [sway].png")).unwrap(), b"c");
    assert!(!temp.path().join("t3_b [dwm].png").exists());
}

#[tokio::test]
async fn unbounded_fan_out_runs_every_download_at_once() {
    let temp = TempDir::new().unwrap();
    let bodies: Vec<(String, &[u8])> = (0..6)
        .map(|i| (format!("https://i.example.com/t3_{i}.png"), b"x".as_slice()))
        .collect();
    let bodies: Vec<(&str, &[u8])> = bodies.iter().map(|(u, b)| (u.as_str(), *b)).collect();
    let fetcher = Arc::new(CannedFetcher::new(&bodies));
    let downloader = Downloader::new(
        fetcher.clone(),
        AtomicFileWriter::new(temp.path().to_path_buf()),
        None,
    );

    let entries = (0..6).map(|i| entry(&format!("t3_{i}"), "[i3]")).collect();
    let report = downloader.download_all(entries).await;

    assert_eq!(report.saved.len(), 6);
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn concurrency_cap_bounds_in_flight_downloads() {
    let temp = TempDir::new().unwrap();
    let bodies: Vec<(String, &[u8])> = (0..6)
        .map(|i| (format!("https://i.example.com/t3_{i}.png"), b"x".as_slice()))
        .collect();
    let bodies: Vec<(&str, &[u8])> = bodies.iter().map(|(u, b)| (u.as_str(), *b)).collect();
    let fetcher = Arc::new(CannedFetcher::new(&bodies));
    let downloader = Downloader::new(
        fetcher.clone(),
        AtomicFileWriter::new(temp.path().to_path_buf()),
        Some(2),
    );

    let entries = (0..6).map(|i| entry(&format!("t3_{i}"), "[i3]")).collect();
    let report = downloader.download_all(entries).await;

    assert_eq!(report.saved.len(), 6);
    assert!(fetcher.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn downloads_real_responses_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::for_images(1024)).unwrap());
    let downloader = Downloader::new(
        fetcher,
        AtomicFileWriter::new(temp.path().to_path_buf()),
        None,
    );
    let entry = Entry::new("t3_abc", format!("{}/abc.png", server.uri()), 2_000, "[bspwm]");

    let report = downloader.download_all(vec![entry]).await;

    assert_eq!(report.saved.len(), 1);
    assert_eq!(report.saved[0].byte_len, 4);
    assert_eq!(
        fs::read(temp.path().join("t3_abc [bspwm].png")).unwrap(),
        vec![0x89, b'P', b'N', b'G']
    );
}
