//! The manager backend capability surface

use async_trait::async_trait;

use crate::Result;

/// Capability surface every package-manager integration exposes.
///
/// Implementations shell out to one external manager CLI; the rest of
/// the system only ever talks to this trait and never builds command
/// lines or parses manager output itself.
#[async_trait]
pub trait ManagerBackend: Send + Sync {
    /// Whether the manager binary is present and responding on this
    /// host.
    async fn is_available(&self) -> Result<bool>;

    /// Names of all packages the manager currently reports as
    /// installed.
    async fn list_installed(&self) -> Result<Vec<String>>;

    /// Install a package. An "already installed" outcome is success:
    /// the contract is convergence to the desired state, not proof of
    /// a state transition.
    async fn install(&self, name: &str) -> Result<()>;

    /// Uninstall a package. A "not installed" outcome is success.
    async fn uninstall(&self, name: &str) -> Result<()>;
}
