//! Batch install and uninstall operations
//!
//! Batches are sequential by design: manager CLIs serialize their own
//! state mutations, so there is nothing to gain from concurrency and
//! plenty to lose. Per-package failures are recorded in the result
//! list, never propagated; only a structural lock failure aborts a
//! batch.

use serde::Serialize;
use tally_lock::LockStore;
use tally_managers::{ManagerRegistry, PackageSpec, RawSpec};

use crate::config::Config;
use crate::{Error, Result};

/// Outcome of one package operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationStatus {
    Added,
    Removed,
    Skipped,
    Failed,
    WouldAdd,
    WouldRemove,
}

/// Per-package result of a batch operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub manager: String,
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    fn ok(spec: &PackageSpec, status: OperationStatus) -> Self {
        Self {
            name: spec.name.clone(),
            manager: spec.manager.clone(),
            status,
            error: None,
        }
    }

    fn failed(spec: &PackageSpec, error: impl ToString) -> Self {
        Self {
            name: spec.name.clone(),
            manager: spec.manager.clone(),
            status: OperationStatus::Failed,
            error: Some(error.to_string()),
        }
    }

    fn unparsable(raw: &str, error: impl ToString) -> Self {
        Self {
            name: raw.to_string(),
            manager: String::new(),
            status: OperationStatus::Failed,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregate view over a batch of operation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[OperationResult]) -> Self {
        let failed = results
            .iter()
            .filter(|r| r.status == OperationStatus::Failed)
            .count();
        Self {
            total: results.len(),
            succeeded: results.len() - failed,
            failed,
        }
    }

    /// Surface a batch with failures as a summary error naming the
    /// count. The per-item results stay with the caller either way.
    pub fn check(&self) -> Result<()> {
        if self.failed > 0 {
            Err(Error::BatchFailed {
                failed: self.failed,
            })
        } else {
            Ok(())
        }
    }
}

/// Options for batch installs.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Manager for specs without a prefix, overriding the configured
    /// default.
    pub manager: Option<String>,
    pub dry_run: bool,
}

/// Options for batch uninstalls.
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    pub manager: Option<String>,
    pub dry_run: bool,
}

/// Install packages and track them in the lock file.
pub async fn install_packages(
    store: &LockStore,
    registry: &ManagerRegistry,
    config: &Config,
    specs: &[String],
    options: &InstallOptions,
) -> Result<Vec<OperationResult>> {
    let default_manager = options
        .manager
        .as_deref()
        .unwrap_or_else(|| config.effective_default_manager());

    let mut results = Vec::with_capacity(specs.len());
    for raw in specs {
        results.push(install_single(store, registry, default_manager, raw, options.dry_run).await?);
    }
    Ok(results)
}

/// Uninstall packages and stop tracking them.
pub async fn uninstall_packages(
    store: &LockStore,
    registry: &ManagerRegistry,
    config: &Config,
    specs: &[String],
    options: &UninstallOptions,
) -> Result<Vec<OperationResult>> {
    let default_manager = options
        .manager
        .as_deref()
        .unwrap_or_else(|| config.effective_default_manager());

    let mut results = Vec::with_capacity(specs.len());
    for raw in specs {
        results
            .push(uninstall_single(store, registry, default_manager, raw, options.dry_run).await?);
    }
    Ok(results)
}

async fn install_single(
    store: &LockStore,
    registry: &ManagerRegistry,
    default_manager: &str,
    raw: &str,
    dry_run: bool,
) -> Result<OperationResult> {
    let spec = match RawSpec::parse(raw) {
        Ok(parsed) => parsed.resolve(default_manager),
        Err(e) => return Ok(OperationResult::unparsable(raw, e)),
    };

    if store.has_package(&spec.manager, &spec.name)? {
        return Ok(OperationResult::ok(&spec, OperationStatus::Skipped));
    }

    if dry_run {
        return Ok(OperationResult::ok(&spec, OperationStatus::WouldAdd));
    }

    let backend = match registry.get(&spec.manager) {
        Ok(backend) => backend,
        Err(e) => return Ok(OperationResult::failed(&spec, e)),
    };

    match backend.is_available().await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(OperationResult::failed(
                &spec,
                tally_managers::Error::ManagerUnavailable {
                    name: spec.manager.clone(),
                },
            ));
        }
        Err(e) => return Ok(OperationResult::failed(&spec, e)),
    }

    if let Err(e) = backend.install(&spec.name).await {
        return Ok(OperationResult::failed(&spec, e));
    }

    // The system install succeeded; a lock failure from here on is the
    // distinct partial-success outcome
    if let Err(e) = store.add_package(&spec.manager, &spec.name) {
        return Ok(OperationResult::failed(
            &spec,
            format!("installed but failed to record in lock file: {e}"),
        ));
    }

    Ok(OperationResult::ok(&spec, OperationStatus::Added))
}

async fn uninstall_single(
    store: &LockStore,
    registry: &ManagerRegistry,
    default_manager: &str,
    raw: &str,
    dry_run: bool,
) -> Result<OperationResult> {
    let parsed = match RawSpec::parse(raw) {
        Ok(parsed) => parsed,
        Err(e) => return Ok(OperationResult::unparsable(raw, e)),
    };

    // Without a prefix, prefer whichever manager tracks the package
    let spec = if parsed.manager.is_some() {
        parsed.resolve(default_manager)
    } else {
        let tracked_under = store.find_package(&parsed.name)?;
        match tracked_under.first() {
            Some(manager) => PackageSpec::new(manager.clone(), parsed.name),
            None => parsed.resolve(default_manager),
        }
    };

    let tracked = store.has_package(&spec.manager, &spec.name)?;

    if dry_run {
        return Ok(OperationResult::ok(&spec, OperationStatus::WouldRemove));
    }

    let backend = match registry.get(&spec.manager) {
        Ok(backend) => backend,
        Err(e) => return Ok(OperationResult::failed(&spec, e)),
    };

    match backend.is_available().await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(OperationResult::failed(
                &spec,
                tally_managers::Error::ManagerUnavailable {
                    name: spec.manager.clone(),
                },
            ));
        }
        Err(e) => return Ok(OperationResult::failed(&spec, e)),
    }

    let uninstalled = backend.uninstall(&spec.name).await;

    if !tracked {
        // Untracked package: pure pass-through to the manager
        return Ok(match uninstalled {
            Ok(()) => OperationResult::ok(&spec, OperationStatus::Removed),
            Err(e) => OperationResult::failed(&spec, e),
        });
    }

    match (uninstalled, store.remove_package(&spec.manager, &spec.name)) {
        (Ok(()), Ok(())) => Ok(OperationResult::ok(&spec, OperationStatus::Removed)),
        (Ok(()), Err(lock_err)) => {
            // System removal succeeded but the entry is still tracked
            let mut result = OperationResult::ok(&spec, OperationStatus::Removed);
            result.error = Some(format!(
                "uninstalled but failed to update lock file: {lock_err}"
            ));
            Ok(result)
        }
        (Err(sys_err), Ok(())) => {
            // No longer tracked even though the system removal failed
            let mut result = OperationResult::ok(&spec, OperationStatus::Removed);
            result.error = Some(format!(
                "no longer tracked (system uninstall failed: {sys_err})"
            ));
            Ok(result)
        }
        (Err(sys_err), Err(_)) => Ok(OperationResult::failed(
            &spec,
            format!("uninstall failed and lock file not updated: {sys_err}"),
        )),
    }
}
