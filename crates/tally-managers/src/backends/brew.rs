//! Homebrew backend

use async_trait::async_trait;

use crate::backend::ManagerBackend;
use crate::parse::{self, LineParseOptions};
use crate::{Result, exec};

const INSTALL_OK: &[&str] = &["already installed"];
const UNINSTALL_OK: &[&str] = &["no such keg", "is not installed"];

/// Backend for Homebrew (macOS/Linux package manager).
#[derive(Debug, Default)]
pub struct BrewBackend;

impl BrewBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ManagerBackend for BrewBackend {
    async fn is_available(&self) -> Result<bool> {
        Ok(exec::command_available("brew", &["--version"]).await)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        let formulas = exec::run("brew", &["list", "--formula", "-1"]).await?;
        let mut packages = parse::parse_lines(&formulas, &LineParseOptions::default());

        // Cask support may be unavailable (e.g. on Linux); failure is
        // non-fatal
        if let Ok(out) = exec::capture("brew", &["list", "--cask", "-1"]).await
            && out.success
        {
            packages.extend(parse::parse_lines(&out.stdout, &LineParseOptions::default()));
        } else {
            tracing::debug!("brew cask listing unavailable, skipping");
        }

        Ok(packages)
    }

    async fn install(&self, name: &str) -> Result<()> {
        exec::run_idempotent("brew", &["install", "--", name], INSTALL_OK).await
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        exec::run_idempotent("brew", &["uninstall", "--", name], UNINSTALL_OK).await
    }
}
