//! src/logging.rs
//!
//! File-backed tracing. The terminal belongs to the TUI, so nothing is ever
//! logged to stdout or stderr.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "NETPEAKS_LOG";
const LOG_FILE: &str = "netpeaks.log";
const DEFAULT_FILTER: &str = "netpeaks=info,warn";

/// Install the global subscriber writing to a daily rolling file.
///
/// Log level follows `NETPEAKS_LOG`, e.g. `NETPEAKS_LOG=debug netpeaks`.
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })?;

    tracing::info!(dir = %log_dir.display(), "netpeaks starting");
    Ok(())
}

pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("netpeaks").join("logs")
}
