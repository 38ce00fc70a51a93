//! Cargo backend

use async_trait::async_trait;

use crate::backend::ManagerBackend;
use crate::parse::{self, LineParseOptions};
use crate::{Result, exec};

const INSTALL_OK: &[&str] = &["already exists in destination", "is already installed"];
const UNINSTALL_OK: &[&str] = &["is not installed", "did not match any packages"];

/// Backend for cargo-installed binary crates.
#[derive(Debug, Default)]
pub struct CargoBackend;

impl CargoBackend {
    pub fn new() -> Self {
        Self
    }

    /// `cargo install --list` prints `name vX.Y.Z:` lines with the
    /// provided binaries indented below them.
    fn list_options() -> LineParseOptions<'static> {
        LineParseOptions {
            skip_indented: true,
            take_first_token: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ManagerBackend for CargoBackend {
    async fn is_available(&self) -> Result<bool> {
        Ok(exec::command_available("cargo", &["--version"]).await)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        let output = exec::run("cargo", &["install", "--list"]).await?;
        Ok(parse::parse_lines(&output, &Self::list_options()))
    }

    async fn install(&self, name: &str) -> Result<()> {
        exec::run_idempotent("cargo", &["install", name], INSTALL_OK).await
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        exec::run_idempotent("cargo", &["uninstall", name], UNINSTALL_OK).await
    }
}
