use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use wallgrab_logging::wg_info;

use crate::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum WatermarkError {
    #[error("watermark file {path:?} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("watermark file {path:?} does not hold an integer timestamp: {content:?}")]
    Corrupt { path: PathBuf, content: String },
    #[error("watermark file {path:?} has no file name")]
    InvalidPath { path: PathBuf },
    #[error("watermark could not be written: {0}")]
    Write(#[from] PersistError),
}

/// The persisted recency boundary: a single base-10 millisecond timestamp in a
/// text file, optionally followed by a newline.
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unparseable file is an error; there is no default watermark.
    pub fn load(&self) -> Result<i64, WatermarkError> {
        let content = fs::read_to_string(&self.path).map_err(|source| WatermarkError::Read {
            path: self.path.clone(),
            source,
        })?;
        let trimmed = content
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(&content);
        let watermark = trimmed
            .parse::<i64>()
            .map_err(|_| WatermarkError::Corrupt {
                path: self.path.clone(),
                content: content.clone(),
            })?;
        wg_info!("Loaded watermark {} from {:?}", watermark, self.path);
        Ok(watermark)
    }

    /// Overwrites the file atomically with `watermark`.
    pub fn save(&self, watermark: i64) -> Result<(), WatermarkError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| WatermarkError::InvalidPath {
                path: self.path.clone(),
            })?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        AtomicFileWriter::new(dir).write(filename, watermark.to_string())?;
        wg_info!("Saved watermark {} to {:?}", watermark, self.path);
        Ok(())
    }
}
