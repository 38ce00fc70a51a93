//! Error types for tally-fs

use std::path::PathBuf;

/// Result type for tally-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tally-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize YAML for {path}: {message}")]
    Serialize { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
