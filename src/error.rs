//! Error types for the fix-group-gen crate.

use std::path::PathBuf;

/// Errors that can occur during group manager generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema model is structurally unusable.
    #[error("schema error: {0}")]
    Schema(String),

    /// A requested FIX version was not found in the schema model.
    #[error("FIX version '{version}' not found in schema (available: {available})")]
    VersionNotFound { version: String, available: String },

    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parse error with context.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An artifact sink reported an I/O failure. Generation aborts on the
    /// first occurrence; output already written is left in place.
    #[error("IO error during group code generation, writing {target}: {source}")]
    Write {
        target: String,
        source: std::io::Error,
    },
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
