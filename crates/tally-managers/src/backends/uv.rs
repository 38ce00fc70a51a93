//! uv tool backend

use async_trait::async_trait;

use crate::backend::ManagerBackend;
use crate::parse::{self, LineParseOptions};
use crate::{Result, exec};

const INSTALL_OK: &[&str] = &["already installed"];
const UNINSTALL_OK: &[&str] = &["is not installed", "not found"];

/// Backend for uv-managed Python tools.
#[derive(Debug, Default)]
pub struct UvBackend;

impl UvBackend {
    pub fn new() -> Self {
        Self
    }

    /// `uv tool list` prints `name vX.Y.Z` lines with the installed
    /// executables as `- name` entries below them.
    fn list_options() -> LineParseOptions<'static> {
        LineParseOptions {
            skip_prefixes: &["-"],
            take_first_token: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ManagerBackend for UvBackend {
    async fn is_available(&self) -> Result<bool> {
        Ok(exec::command_available("uv", &["--version"]).await)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        let output = exec::run("uv", &["tool", "list"]).await?;
        Ok(parse::parse_lines(&output, &Self::list_options()))
    }

    async fn install(&self, name: &str) -> Result<()> {
        exec::run_idempotent("uv", &["tool", "install", name], INSTALL_OK).await
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        exec::run_idempotent("uv", &["tool", "uninstall", name], UNINSTALL_OK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_parsing() {
        let output = "black v24.2.0\n- black\n- blackd\nruff v0.3.0\n- ruff\n";
        let packages = parse::parse_lines(output, &UvBackend::list_options());
        assert_eq!(packages, vec!["black", "ruff"]);
    }
}
