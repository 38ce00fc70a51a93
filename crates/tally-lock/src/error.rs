//! Error types for tally-lock

use std::path::PathBuf;

/// Result type for tally-lock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tally-lock operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported lock version {0}")]
    UnsupportedVersion(u32),

    #[error("failed to parse lock file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Fs(#[from] tally_fs::Error),
}
