use std::path::PathBuf;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use wallgrab_core::Entry;
use wallgrab_logging::{wg_error, wg_info};

use crate::filename::image_filename;
use crate::{AtomicFileWriter, FetchError, Fetcher, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("write failed: {0}")]
    Persist(#[from] PersistError),
    #[error("download task aborted: {0}")]
    Task(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub entry_id: String,
    pub path: PathBuf,
    pub byte_len: u64,
}

#[derive(Debug)]
pub struct DownloadFailure {
    pub entry_id: String,
    pub source_url: String,
    pub error: DownloadError,
}

/// Per-entry outcomes, in the order the entries were handed in.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub saved: Vec<SavedImage>,
    pub failures: Vec<DownloadFailure>,
}

impl DownloadReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failures.len()
    }
}

/// Fans out one task per entry and waits for all of them.
pub struct Downloader {
    fetcher: Arc<dyn Fetcher>,
    writer: AtomicFileWriter,
    max_concurrent: Option<usize>,
}

impl Downloader {
    /// `max_concurrent` of `None` runs every download at once.
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        writer: AtomicFileWriter,
        max_concurrent: Option<usize>,
    ) -> Self {
        Self {
            fetcher,
            writer,
            max_concurrent,
        }
    }

    /// Returns once every download has either been written or failed.
    /// A failure never affects the other downloads.
    pub async fn download_all(&self, entries: Vec<Entry>) -> DownloadReport {
        let semaphore = self
            .max_concurrent
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        let mut targets = Vec::with_capacity(entries.len());
        let mut handles = Vec::with_capacity(entries.len());
        for entry in entries {
            targets.push((entry.id.clone(), entry.source_url.clone()));
            let fetcher = self.fetcher.clone();
            let writer = self.writer.clone();
            let semaphore = semaphore.clone();
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                download_one(fetcher.as_ref(), writer, &entry).await
            }));
        }

        let mut report = DownloadReport::default();
        for ((entry_id, source_url), joined) in targets.into_iter().zip(join_all(handles).await) {
            let result = joined.unwrap_or_else(|err| Err(DownloadError::Task(err.to_string())));
            match result {
                Ok(saved) => {
                    wg_info!("{} has been downloaded as {:?}", source_url, saved.path);
                    report.saved.push(saved);
                }
                Err(error) => {
                    wg_error!("Download of {} ({}) failed: {}", entry_id, source_url, error);
                    report.failures.push(DownloadFailure {
                        entry_id,
                        source_url,
                        error,
                    });
                }
            }
        }
        report
    }
}

async fn download_one(
    fetcher: &dyn Fetcher,
    writer: AtomicFileWriter,
    entry: &Entry,
) -> Result<SavedImage, DownloadError> {
    let output = fetcher.fetch(&entry.source_url).await?;
    let filename = image_filename(entry);
    let byte_len = output.metadata.byte_len;
    let path = tokio::task::spawn_blocking(move || writer.write(&filename, &output.bytes))
        .await
        .map_err(|err| DownloadError::Task(err.to_string()))??;
    Ok(SavedImage {
        entry_id: entry.id.clone(),
        path,
        byte_len,
    })
}
