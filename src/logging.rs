//! Tracing subscriber setup
//!
//! Logs go to stderr and, when a log file is configured, to that file as JSON
//! lines through a non-blocking writer. `RUST_LOG` overrides the configured level.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Failed to open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse a level name such as `debug` or `WARN`
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    level
        .trim()
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!("msbuild_finder={level}"))
}

/// Install the global subscriber.
///
/// Only the first call has an effect. The returned guard flushes the log file
/// when dropped and must be held for the life of the program.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, LoggingError> {
    let level = parse_level(level)?;

    let mut result = Ok(None);
    INIT.call_once(|| result = install(level, log_file));
    result
}

fn install(level: LevelFilter, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Another subscriber may already be installed by an embedding program
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .try_init();

    Ok(guard)
}

fn open_log_file(path: &Path) -> Result<fs::File, LoggingError> {
    let to_error = |source| LoggingError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}
