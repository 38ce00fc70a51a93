//! Node.js-family backends (npm, pnpm, bun)
//!
//! One backend drives all three CLIs; only the listing format and the
//! add/remove verbs differ per provider.

use async_trait::async_trait;

use crate::backend::ManagerBackend;
use crate::{Error, Result, exec, parse};

const INSTALL_OK: &[&str] = &["already installed"];
const UNINSTALL_OK: &[&str] = &["not installed", "not found"];

/// Which Node.js package manager CLI this backend drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeProvider {
    Npm,
    Pnpm,
    Bun,
}

impl NodeProvider {
    fn binary(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }
}

/// Backend for globally installed Node.js packages.
#[derive(Debug)]
pub struct NodeBackend {
    provider: NodeProvider,
}

impl NodeBackend {
    pub fn new(provider: NodeProvider) -> Self {
        Self { provider }
    }

    pub fn npm() -> Self {
        Self::new(NodeProvider::Npm)
    }

    pub fn pnpm() -> Self {
        Self::new(NodeProvider::Pnpm)
    }

    pub fn bun() -> Self {
        Self::new(NodeProvider::Bun)
    }
}

#[async_trait]
impl ManagerBackend for NodeBackend {
    async fn is_available(&self) -> Result<bool> {
        Ok(exec::command_available(self.provider.binary(), &["--version"]).await)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        let binary = self.provider.binary();
        match self.provider {
            NodeProvider::Npm => {
                // npm exits 1 on peer-dependency warnings but still
                // prints valid JSON, so parse whatever came back
                let out =
                    exec::capture(binary, &["list", "-g", "--depth=0", "--json"]).await?;
                if out.stdout.trim().is_empty() {
                    return Err(Error::CommandFailed {
                        program: binary.to_string(),
                        output: out.combined.trim().to_string(),
                    });
                }
                parse::parse_json_dependencies(binary, &out.stdout, false)
            }
            NodeProvider::Pnpm => {
                let output =
                    exec::run(binary, &["list", "-g", "--depth=0", "--json"]).await?;
                parse::parse_json_dependencies(binary, &output, true)
            }
            NodeProvider::Bun => {
                let output = exec::run(binary, &["pm", "ls", "-g"]).await?;
                Ok(parse_bun_list(&output))
            }
        }
    }

    async fn install(&self, name: &str) -> Result<()> {
        let binary = self.provider.binary();
        let args: &[&str] = match self.provider {
            NodeProvider::Npm => &["install", "-g", name],
            NodeProvider::Pnpm => &["add", "-g", name],
            NodeProvider::Bun => &["add", "-g", name],
        };
        exec::run_idempotent(binary, args, INSTALL_OK).await
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        let binary = self.provider.binary();
        let args: &[&str] = match self.provider {
            NodeProvider::Npm => &["uninstall", "-g", name],
            NodeProvider::Pnpm => &["remove", "-g", name],
            NodeProvider::Bun => &["remove", "-g", name],
        };
        exec::run_idempotent(binary, args, UNINSTALL_OK).await
    }
}

/// Parse `bun pm ls -g` tree output into package names.
///
/// Lines look like `├── typescript@5.3.3`; the version suffix after
/// the last `@` is dropped so scoped names keep their leading `@`.
fn parse_bun_list(output: &str) -> Vec<String> {
    let mut packages = Vec::new();
    for line in output.lines() {
        let Some(idx) = line.find("── ") else {
            continue;
        };
        let entry = line[idx + "── ".len()..].trim();
        if entry.is_empty() {
            continue;
        }
        let name = match entry.rfind('@') {
            Some(0) | None => entry,
            Some(pos) => &entry[..pos],
        };
        packages.push(name.to_string());
    }
    packages
}
