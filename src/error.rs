//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the schedule engine.
///
/// These indicate a caller bug, not bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid tick: {0}")]
    InvalidTick(i64),
}

/// Errors raised while building a `TimerConfig` from external input
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed timer config: {0}")]
    Malformed(String),
}

/// Errors surfaced by the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session is no longer running")]
    SessionClosed,
}
