//! State reconciliation: desired versus actual package sets

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tally_lock::Lock;
use tally_managers::{ManagerBackend, ManagerRegistry, PackageSpec};
use tokio::task::JoinSet;

/// Result of reconciling a desired set against an actual set.
///
/// Ordering within the partitions is unspecified; callers must not
/// depend on it.
#[derive(Debug, Clone, Default)]
pub struct ReconcileResult {
    /// Tracked and installed
    pub managed: Vec<PackageSpec>,
    /// Tracked but not installed
    pub missing: Vec<PackageSpec>,
    /// Installed but not tracked
    pub untracked: Vec<PackageSpec>,
}

/// Options for gathering the actual package set.
#[derive(Debug, Clone, Default)]
pub struct GatherOptions {
    /// Abandon a backend's query after this long; a timed-out backend
    /// simply contributes nothing.
    pub backend_timeout: Option<Duration>,
}

/// Compute the three-way diff between desired and actual sets.
///
/// Sets are keyed by `manager:name`, so the same name under two
/// managers is two independent units. Linear in the sizes of the
/// inputs.
pub fn reconcile(desired: Vec<PackageSpec>, actual: Vec<PackageSpec>) -> ReconcileResult {
    let desired_set: HashMap<String, PackageSpec> =
        desired.into_iter().map(|p| (p.key(), p)).collect();
    let actual_set: HashMap<String, PackageSpec> =
        actual.into_iter().map(|p| (p.key(), p)).collect();

    let mut result = ReconcileResult::default();

    for (key, spec) in &desired_set {
        if actual_set.contains_key(key) {
            result.managed.push(spec.clone());
        } else {
            result.missing.push(spec.clone());
        }
    }

    for (key, spec) in actual_set {
        if !desired_set.contains_key(&key) {
            result.untracked.push(spec);
        }
    }

    result
}

/// Extract the desired package set from a lock document.
pub fn desired_from_lock(lock: &Lock) -> Vec<PackageSpec> {
    lock.packages
        .iter()
        .flat_map(|(manager, names)| {
            names.iter().map(move |name| PackageSpec::new(manager, name))
        })
        .collect()
}

/// Gather the actual package set from every registered backend.
///
/// The defining property is failure isolation: a backend that cannot
/// be resolved, reports itself unavailable, errors, or times out
/// contributes nothing — and never prevents collection from the
/// others. Queries run concurrently; results merge at the join
/// barrier.
pub async fn actual_installed(registry: &ManagerRegistry) -> Vec<PackageSpec> {
    actual_installed_with(registry, &GatherOptions::default()).await
}

/// [`actual_installed`] with explicit gathering options.
pub async fn actual_installed_with(
    registry: &ManagerRegistry,
    options: &GatherOptions,
) -> Vec<PackageSpec> {
    let mut tasks: JoinSet<Vec<PackageSpec>> = JoinSet::new();

    for name in registry.manager_names() {
        let backend = match registry.get(&name) {
            Ok(backend) => backend,
            Err(e) => {
                tracing::warn!(manager = %name, "skipping manager: {e}");
                continue;
            }
        };

        let timeout = options.backend_timeout;
        tasks.spawn(async move {
            match timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, query_backend(&name, backend)).await {
                        Ok(found) => found,
                        Err(_) => {
                            tracing::warn!(manager = %name, "backend query timed out");
                            Vec::new()
                        }
                    }
                }
                None => query_backend(&name, backend).await,
            }
        });
    }

    let mut specs = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(mut found) => specs.append(&mut found),
            Err(e) => tracing::warn!("backend query task failed: {e}"),
        }
    }
    specs
}

async fn query_backend(name: &str, backend: Arc<dyn ManagerBackend>) -> Vec<PackageSpec> {
    match backend.is_available().await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!(manager = %name, "manager not available, skipping");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(manager = %name, "availability check failed: {e}");
            return Vec::new();
        }
    }

    match backend.list_installed().await {
        Ok(installed) => installed
            .into_iter()
            .map(|package| PackageSpec::new(name, package))
            .collect(),
        Err(e) => {
            tracing::warn!(manager = %name, "listing installed packages failed: {e}");
            Vec::new()
        }
    }
}

/// Reconcile the lock document's desired set against the host.
pub async fn reconcile_from_lock(lock: &Lock, registry: &ManagerRegistry) -> ReconcileResult {
    reconcile_from_lock_with(lock, registry, &GatherOptions::default()).await
}

/// [`reconcile_from_lock`] with explicit gathering options.
pub async fn reconcile_from_lock_with(
    lock: &Lock,
    registry: &ManagerRegistry,
    options: &GatherOptions,
) -> ReconcileResult {
    let desired = desired_from_lock(lock);
    let actual = actual_installed_with(registry, options).await;
    reconcile(desired, actual)
}
