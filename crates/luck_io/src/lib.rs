//! File-facing side of the engine. The core crates never touch the filesystem;
//! everything that reads or writes bytes lives here.
//!
//! - `loader`: config JSON and history snapshot JSON → typed inputs
//! - `canonical_json`: sorted-key compact JSON + atomic write
//! - `hasher`: SHA-256 over raw bytes and canonical JSON

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for luck_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON (de)serialization errors with a JSON Pointer-ish location.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Input exceeds a hard limit or has the wrong top-level shape.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub use loader::{load_config, load_history, Draw, HistorySnapshot, SkippedRow};
