//! Filesystem layer for tally
//!
//! Provides atomic file replacement and YAML document I/O for the lock
//! file and user configuration, plus configuration-directory
//! resolution.

pub mod error;
pub mod io;
pub mod paths;
pub mod yaml;

pub use error::{Error, Result};
pub use io::write_atomic;
pub use paths::config_dir;
