//! Loading of the optional `wallgrab.ron` configuration file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use wallgrab_engine::CrawlerConfig;
use wallgrab_logging::wg_info;

pub(crate) const CONFIG_FILENAME: &str = "wallgrab.ron";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads the config at `path`. A missing file means defaults; a malformed one is an error.
pub(crate) fn load_config(path: &Path) -> Result<CrawlerConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            wg_info!("No config at {:?}, using defaults", path);
            return Ok(CrawlerConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str::<CrawlerConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    wg_info!("Loaded config from {:?}", path);
    Ok(config)
}
