//! Go toolchain backend
//!
//! `go install` drops binaries into a bin directory rather than
//! keeping a package database, so listing scans that directory and
//! uninstalling removes the binary.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::backend::ManagerBackend;
use crate::{Result, exec};

/// Backend for `go install`-managed binaries.
#[derive(Debug, Default)]
pub struct GoBackend {
    bin_override: Option<PathBuf>,
}

impl GoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed bin directory instead of the `$GOBIN`/`$GOPATH`
    /// resolution. Intended for tests.
    pub fn with_bin_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_override: Some(dir.into()),
        }
    }

    /// Resolve the directory `go install` targets: `$GOBIN`, then
    /// `$GOPATH/bin`, then `~/go/bin`.
    fn bin_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.bin_override {
            return Some(dir.clone());
        }

        if let Ok(gobin) = std::env::var("GOBIN")
            && !gobin.is_empty()
        {
            return Some(PathBuf::from(gobin));
        }

        if let Ok(gopath) = std::env::var("GOPATH")
            && !gopath.is_empty()
        {
            return Some(Path::new(&gopath).join("bin"));
        }

        dirs::home_dir().map(|home| home.join("go").join("bin"))
    }
}

/// Extract the binary name from a package path,
/// e.g. `golang.org/x/tools/gopls@latest` -> `gopls`.
fn binary_name(package: &str) -> &str {
    let name = package.rsplit('/').next().unwrap_or(package);
    match name.find('@') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

#[async_trait]
impl ManagerBackend for GoBackend {
    async fn is_available(&self) -> Result<bool> {
        Ok(exec::command_available("go", &["version"]).await)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        let Some(bin_dir) = self.bin_dir() else {
            return Ok(Vec::new());
        };

        let entries = match fs::read_dir(&bin_dir) {
            Ok(entries) => entries,
            // A fresh toolchain has no bin directory yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut packages = Vec::new();
        for entry in entries.flatten() {
            if entry.path().is_file() {
                packages.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        packages.sort();
        Ok(packages)
    }

    async fn install(&self, name: &str) -> Result<()> {
        // go install requires a version suffix
        let package = if name.contains('@') {
            name.to_string()
        } else {
            format!("{name}@latest")
        };
        exec::run("go", &["install", &package]).await?;
        Ok(())
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        let Some(bin_dir) = self.bin_dir() else {
            return Ok(());
        };

        let binary = bin_dir.join(binary_name(name));
        match fs::remove_file(&binary) {
            Ok(()) => Ok(()),
            // Already gone counts as success
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
