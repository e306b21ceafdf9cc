//! Logging setup
//!
//! Installs a `tracing` subscriber filtered by [`Settings::log_filter`].
//! Logs go to stderr unless a log file is configured. The log file's
//! directory is created on demand.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{Settings, DEFAULT_LOG_FILTER};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Cannot open log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Logging already initialized: {0}")]
    Init(String),
}

/// Filter from a directive string, falling back to the default on a bad directive
pub fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub fn init(settings: &Settings) -> Result<(), LoggingError> {
    let filter = filter(&settings.log_filter);

    match &settings.log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string())),
    }
}

/// Open `path` for appending, creating missing parent directories
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let err = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(err)
}
