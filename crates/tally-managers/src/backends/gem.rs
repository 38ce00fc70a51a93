//! RubyGems backend

use async_trait::async_trait;

use crate::backend::ManagerBackend;
use crate::parse::{self, LineParseOptions};
use crate::{Result, exec};

const INSTALL_OK: &[&str] = &["already installed"];
const UNINSTALL_OK: &[&str] = &["is not installed"];

/// Backend for RubyGems.
///
/// Installs with `--user-install` so no elevated privileges are
/// needed for the system Ruby.
#[derive(Debug, Default)]
pub struct GemBackend;

impl GemBackend {
    pub fn new() -> Self {
        Self
    }

    fn list_options() -> LineParseOptions<'static> {
        LineParseOptions {
            skip_prefixes: &["***"],
            ..Default::default()
        }
    }
}

#[async_trait]
impl ManagerBackend for GemBackend {
    async fn is_available(&self) -> Result<bool> {
        Ok(exec::command_available("gem", &["--version"]).await)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        let output = exec::run("gem", &["list", "--no-versions"]).await?;
        Ok(parse::parse_lines(&output, &Self::list_options()))
    }

    async fn install(&self, name: &str) -> Result<()> {
        exec::run_idempotent("gem", &["install", "--user-install", name], INSTALL_OK).await
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        // -x removes executables, -a removes all matching versions
        exec::run_idempotent("gem", &["uninstall", name, "-x", "-a"], UNINSTALL_OK).await
    }
}
