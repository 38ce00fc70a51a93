//! Error types for tally-core

/// Result type for tally-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tally-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{failed} package operation(s) failed")]
    BatchFailed { failed: usize },

    #[error(transparent)]
    Lock(#[from] tally_lock::Error),

    #[error(transparent)]
    Managers(#[from] tally_managers::Error),
}
