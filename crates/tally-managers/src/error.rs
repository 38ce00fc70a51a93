//! Error types for tally-managers

/// Result type for tally-managers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tally-managers operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported package manager: {name} (supported: {supported})")]
    UnsupportedManager { name: String, supported: String },

    #[error("package manager {name} is not available on this host")]
    ManagerUnavailable { name: String },

    #[error("invalid package spec {spec:?}: {reason}")]
    InvalidSpec { spec: String, reason: &'static str },

    #[error("{program} failed: {output}")]
    CommandFailed { program: String, output: String },

    #[error("failed to parse {program} output: {message}")]
    OutputParse { program: String, message: String },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
