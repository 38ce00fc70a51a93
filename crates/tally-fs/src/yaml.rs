//! YAML document loading and saving
//!
//! Thin serde_yaml wrappers that attach file paths to errors and route
//! writes through the atomic writer.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, io};

/// Load a YAML document from a file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = io::read_text(path)?;
    serde_yaml::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save a YAML document to a file atomically.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_yaml::to_string(value).map_err(|e| Error::Serialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    io::write_atomic(path, content.as_bytes())
}
