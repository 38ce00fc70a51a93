//! Durable lock storage with version detection and migration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::document::{LOCK_VERSION, Lock};
use crate::legacy::{self, LockV1, LockV2};
use crate::{Error, Result};

/// Lock file name inside the configuration directory.
pub const LOCK_FILE_NAME: &str = "tally.lock";

#[derive(Debug, Deserialize)]
struct VersionProbe {
    #[serde(default = "default_version")]
    version: u32,
}

// Files predating the version field are oldest-generation
fn default_version() -> u32 {
    1
}

/// Sole authority over the on-disk desired-state document.
///
/// All writes go through atomic replacement, so no reader ever
/// observes a half-written file. There is no cross-process locking;
/// unrelated concurrent writers are not serialized against each other.
pub struct LockStore {
    path: PathBuf,
}

impl LockStore {
    /// Create a store for the lock file inside `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: config_dir.into().join(LOCK_FILE_NAME),
        }
    }

    /// Path to the lock file.
    pub fn lock_path(&self) -> &Path {
        &self.path
    }

    /// Read the lock document.
    ///
    /// A missing file yields an empty document at the current version.
    /// Older generations are migrated and persisted immediately, so
    /// subsequent reads parse the current schema natively. A version
    /// newer than [`LOCK_VERSION`] is rejected.
    pub fn read(&self) -> Result<Lock> {
        if !self.path.exists() {
            return Ok(Lock::new());
        }

        let content = tally_fs::io::read_text(&self.path)?;
        let probe: VersionProbe =
            serde_yaml::from_str(&content).map_err(|e| self.parse_error(e))?;

        match probe.version {
            1 => {
                let old: LockV1 =
                    serde_yaml::from_str(&content).map_err(|e| self.parse_error(e))?;
                self.persist_migrated(legacy::migrate_v1(old), 1)
            }
            2 => {
                let old: LockV2 =
                    serde_yaml::from_str(&content).map_err(|e| self.parse_error(e))?;
                self.persist_migrated(legacy::migrate_v2(old), 2)
            }
            LOCK_VERSION => serde_yaml::from_str(&content).map_err(|e| self.parse_error(e)),
            newer => Err(Error::UnsupportedVersion(newer)),
        }
    }

    /// Persist the whole document atomically.
    pub fn write(&self, lock: &Lock) -> Result<()> {
        tally_fs::yaml::save(&self.path, lock)?;
        Ok(())
    }

    /// Track a package, persisting immediately. Idempotent: adding an
    /// already-tracked package does not rewrite the file.
    pub fn add_package(&self, manager: &str, name: &str) -> Result<()> {
        let mut lock = self.read()?;
        if lock.has_package(manager, name) {
            return Ok(());
        }
        lock.add_package(manager, name);
        self.write(&lock)
    }

    /// Stop tracking a package, persisting immediately. Removing an
    /// absent package is not an error and does not rewrite the file.
    pub fn remove_package(&self, manager: &str, name: &str) -> Result<()> {
        let mut lock = self.read()?;
        if !lock.has_package(manager, name) {
            return Ok(());
        }
        lock.remove_package(manager, name);
        self.write(&lock)
    }

    /// Check whether a package is tracked.
    pub fn has_package(&self, manager: &str, name: &str) -> Result<bool> {
        Ok(self.read()?.has_package(manager, name))
    }

    /// All packages tracked under a manager.
    pub fn packages(&self, manager: &str) -> Result<Vec<String>> {
        Ok(self.read()?.packages(manager).to_vec())
    }

    /// Every manager under which `name` is tracked.
    pub fn find_package(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.read()?.find_package(name))
    }

    /// All tracked `manager:name` keys, sorted.
    pub fn all_packages(&self) -> Result<Vec<String>> {
        Ok(self.read()?.all_packages())
    }

    fn persist_migrated(&self, lock: Lock, from: u32) -> Result<Lock> {
        self.write(&lock)?;
        tracing::info!(
            path = %self.path.display(),
            "migrated lock file from v{from} to v{LOCK_VERSION}"
        );
        Ok(lock)
    }

    fn parse_error(&self, e: serde_yaml::Error) -> Error {
        Error::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}
