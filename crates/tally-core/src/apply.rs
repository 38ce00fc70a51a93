//! Apply: install every tracked package that is missing

use std::collections::HashSet;

use tally_lock::LockStore;
use tally_managers::{ManagerRegistry, PackageSpec};

use crate::Result;
use crate::operations::{OperationResult, OperationStatus};

/// Options for apply.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub dry_run: bool,
}

/// Install all tracked packages that are not currently installed.
///
/// Managers are processed in sorted order, so managers that provide
/// tools (e.g. `brew:go`) run before managers that depend on them
/// (e.g. go-installed binaries). A manager that cannot be used marks
/// each of its packages failed and the batch moves on.
pub async fn apply(
    store: &LockStore,
    registry: &ManagerRegistry,
    options: &ApplyOptions,
) -> Result<Vec<OperationResult>> {
    let lock = store.read()?;
    let mut results = Vec::new();

    for (manager, packages) in &lock.packages {
        let fail_all = |error: &str, results: &mut Vec<OperationResult>| {
            for name in packages {
                results.push(OperationResult {
                    name: name.clone(),
                    manager: manager.clone(),
                    status: OperationStatus::Failed,
                    error: Some(error.to_string()),
                });
            }
        };

        let backend = match registry.get(manager) {
            Ok(backend) => backend,
            Err(e) => {
                fail_all(&e.to_string(), &mut results);
                continue;
            }
        };

        match backend.is_available().await {
            Ok(true) => {}
            Ok(false) => {
                let e = tally_managers::Error::ManagerUnavailable {
                    name: manager.clone(),
                };
                fail_all(&e.to_string(), &mut results);
                continue;
            }
            Err(e) => {
                fail_all(&e.to_string(), &mut results);
                continue;
            }
        }

        let installed: HashSet<String> = match backend.list_installed().await {
            Ok(list) => list.into_iter().collect(),
            Err(e) => {
                fail_all(&e.to_string(), &mut results);
                continue;
            }
        };

        for name in packages {
            let spec = PackageSpec::new(manager.clone(), name.clone());
            if installed.contains(name) {
                results.push(result_for(&spec, OperationStatus::Skipped));
                continue;
            }
            if options.dry_run {
                results.push(result_for(&spec, OperationStatus::WouldAdd));
                continue;
            }
            match backend.install(name).await {
                Ok(()) => results.push(result_for(&spec, OperationStatus::Added)),
                Err(e) => results.push(OperationResult {
                    name: name.clone(),
                    manager: manager.clone(),
                    status: OperationStatus::Failed,
                    error: Some(e.to_string()),
                }),
            }
        }
    }

    Ok(results)
}

fn result_for(spec: &PackageSpec, status: OperationStatus) -> OperationResult {
    OperationResult {
        name: spec.name.clone(),
        manager: spec.manager.clone(),
        status,
        error: None,
    }
}
