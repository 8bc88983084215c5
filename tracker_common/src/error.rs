//! Error types shared across the workspace.
//!
//! The `TrackerError` enum unifies common failure cases for I/O, HTTP transport,
//! JSON decoding, poisoned locks, and user input, allowing every module
//! to propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the client modules.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// I/O error originating from the standard library (files, chart output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Transport-level failure: connection refused, timeout, TLS, body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("Backend returned {status} for {path}")]
    Status {
        /// Numeric HTTP status.
        status: u16,
        /// Request path that failed.
        path: String,
    },

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing a symbols file into `Symbol` values.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Transaction side other than `BUY` or `SELL`.
    #[error("Invalid transaction side: {0}")]
    InvalidSide(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for TrackerError {
    fn from(err: PoisonError<T>) -> Self {
        TrackerError::MutexLock(err.to_string())
    }
}

impl TrackerError {
    /// True for failures where the backend could not be reached or answered badly,
    /// as opposed to local errors. Only these may be replaced by sample data.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            TrackerError::Http(_) | TrackerError::Status { .. } | TrackerError::SerdeJson(_)
        )
    }
}
