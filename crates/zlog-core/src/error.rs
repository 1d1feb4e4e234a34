//! Typed error definitions for the logging engine.
//!
//! [`ZlogError`] covers construction-time configuration problems and emit-time
//! I/O failures. Malformed levels and unserializable field values are
//! recovered where they occur and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by logger construction and log emission.
#[derive(Debug, Error)]
pub enum ZlogError {
    /// Invalid module identifier, unknown time zone, or bad config content.
    #[error("config error: {0}")]
    Config(String),

    /// Log directory or file could not be created or appended to.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZlogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ZlogError>;
