//! End-to-end integration tests for the vertical slice
//!
//! These exercise the complete flow across crates: lock persistence
//! and migration -> reconciliation against live backends -> batch
//! operations converging the host toward desired state.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tally_core::{
    ApplyOptions, BatchSummary, Config, InstallOptions, OperationStatus, UninstallOptions,
    apply, install_packages, reconcile_from_lock, uninstall_packages,
};
use tally_lock::{LOCK_FILE_NAME, LockStore};
use tally_managers::PackageSpec;
use tally_test_utils::{MockBackend, registry_with};
use tempfile::TempDir;

fn keys(specs: &[PackageSpec]) -> HashSet<String> {
    specs.iter().map(PackageSpec::key).collect()
}

fn strings(specs: &[&str]) -> Vec<String> {
    specs.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_install_then_reconcile_reports_managed() {
    let temp = TempDir::new().unwrap();
    let store = LockStore::new(temp.path());
    let brew = Arc::new(MockBackend::new());
    let registry = registry_with([("brew", brew.clone())]);

    let results = install_packages(
        &store,
        &registry,
        &Config::default(),
        &strings(&["brew:git", "brew:fzf"]),
        &InstallOptions::default(),
    )
    .await
    .unwrap();
    assert!(results.iter().all(|r| r.status == OperationStatus::Added));

    // The lock file on disk is the current schema with sorted lists
    let raw = fs::read_to_string(temp.path().join(LOCK_FILE_NAME)).unwrap();
    assert!(raw.contains("version: 3"));
    assert!(raw.find("fzf").unwrap() < raw.find("git").unwrap());

    let lock = store.read().unwrap();
    let result = reconcile_from_lock(&lock, &registry).await;
    assert_eq!(
        keys(&result.managed),
        HashSet::from(["brew:git".to_string(), "brew:fzf".to_string()])
    );
    assert!(result.missing.is_empty());
    assert!(result.untracked.is_empty());
}

#[tokio::test]
async fn test_reconcile_detects_drift_in_both_directions() {
    let temp = TempDir::new().unwrap();
    let store = LockStore::new(temp.path());
    store.add_package("brew", "git").unwrap();
    store.add_package("npm", "typescript").unwrap();

    // git is present, typescript was removed behind our back, curl
    // appeared untracked
    let registry = registry_with([
        ("brew", Arc::new(MockBackend::new().with_installed(["git", "curl"]))),
        ("npm", Arc::new(MockBackend::new())),
    ]);

    let lock = store.read().unwrap();
    let result = reconcile_from_lock(&lock, &registry).await;

    assert_eq!(keys(&result.managed), HashSet::from(["brew:git".to_string()]));
    assert_eq!(
        keys(&result.missing),
        HashSet::from(["npm:typescript".to_string()])
    );
    assert_eq!(
        keys(&result.untracked),
        HashSet::from(["brew:curl".to_string()])
    );
}

#[tokio::test]
async fn test_apply_converges_missing_packages() {
    let temp = TempDir::new().unwrap();
    let store = LockStore::new(temp.path());
    store.add_package("brew", "git").unwrap();
    store.add_package("brew", "fzf").unwrap();

    let brew = Arc::new(MockBackend::new().with_installed(["git"]));
    let registry = registry_with([("brew", brew.clone())]);

    let results = apply(&store, &registry, &ApplyOptions::default())
        .await
        .unwrap();
    assert!(BatchSummary::from_results(&results).check().is_ok());
    assert_eq!(brew.install_calls(), ["fzf"]);

    // Reconciling afterwards shows no missing packages
    let lock = store.read().unwrap();
    let result = reconcile_from_lock(&lock, &registry).await;
    assert!(result.missing.is_empty());
    assert_eq!(result.managed.len(), 2);
}

#[tokio::test]
async fn test_legacy_lock_migrates_then_reconciles() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(LOCK_FILE_NAME),
        r#"version: 2
resources:
  - type: package
    id: "brew:git"
    metadata:
      manager: brew
      name: git
      version: "2.43.0"
  - type: package
    id: "cargo:bat"
    metadata:
      manager: cargo
      name: bat
  - type: dotfile
    id: "~/.zshrc"
    metadata:
      path: ~/.zshrc
"#,
    )
    .unwrap();

    let store = LockStore::new(temp.path());
    let lock = store.read().unwrap();
    assert_eq!(lock.all_packages(), ["brew:git", "cargo:bat"]);

    // The migrated document persisted in the current schema
    let raw = fs::read_to_string(temp.path().join(LOCK_FILE_NAME)).unwrap();
    assert!(raw.contains("version: 3"));
    assert!(!raw.contains("resources"));

    let registry = registry_with([
        ("brew", Arc::new(MockBackend::new().with_installed(["git"]))),
        ("cargo", Arc::new(MockBackend::new())),
    ]);
    let result = reconcile_from_lock(&lock, &registry).await;
    assert_eq!(keys(&result.managed), HashSet::from(["brew:git".to_string()]));
    assert_eq!(keys(&result.missing), HashSet::from(["cargo:bat".to_string()]));
}

#[tokio::test]
async fn test_install_uninstall_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = LockStore::new(temp.path());
    let brew = Arc::new(MockBackend::new());
    let registry = registry_with([("brew", brew.clone())]);
    let config = Config::default();

    install_packages(
        &store,
        &registry,
        &config,
        &strings(&["brew:git"]),
        &InstallOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(brew.installed(), ["git"]);
    assert!(store.has_package("brew", "git").unwrap());

    let results = uninstall_packages(
        &store,
        &registry,
        &config,
        &strings(&["git"]),
        &UninstallOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(results[0].status, OperationStatus::Removed);
    assert!(brew.installed().is_empty());
    assert!(!store.has_package("brew", "git").unwrap());

    // The manager key is gone entirely, not left as an empty list
    let raw = fs::read_to_string(temp.path().join(LOCK_FILE_NAME)).unwrap();
    assert!(!raw.contains("brew"));
}

#[tokio::test]
async fn test_batch_partial_failure_keeps_full_result_list() {
    let temp = TempDir::new().unwrap();
    let store = LockStore::new(temp.path());
    let registry = registry_with([
        ("brew", Arc::new(MockBackend::new())),
        ("npm", Arc::new(MockBackend::new().failing_install())),
    ]);

    let results = install_packages(
        &store,
        &registry,
        &Config::default(),
        &strings(&["brew:git", "npm:typescript", "brew:jq"]),
        &InstallOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 3);
    let summary = BatchSummary::from_results(&results);
    assert_eq!((summary.total, summary.succeeded, summary.failed), (3, 2, 1));

    let err = summary.check().unwrap_err();
    assert!(err.to_string().contains("1 package operation(s) failed"));

    // Successes landed in the lock despite the aggregate failure
    assert!(store.has_package("brew", "git").unwrap());
    assert!(store.has_package("brew", "jq").unwrap());
    assert!(!store.has_package("npm", "typescript").unwrap());
}

#[tokio::test]
async fn test_failing_backend_never_sinks_reconciliation() {
    let temp = TempDir::new().unwrap();
    let store = LockStore::new(temp.path());
    store.add_package("brew", "git").unwrap();

    let registry = registry_with([
        ("brew", Arc::new(MockBackend::new().with_installed(["git"]))),
        ("npm", Arc::new(MockBackend::new().failing_list())),
        ("gem", Arc::new(MockBackend::new().failing_availability())),
    ]);

    let lock = store.read().unwrap();
    let result = reconcile_from_lock(&lock, &registry).await;

    assert_eq!(keys(&result.managed), HashSet::from(["brew:git".to_string()]));
    assert!(result.missing.is_empty());
    assert!(result.untracked.is_empty());
}

#[tokio::test]
async fn test_unsupported_lock_version_aborts_operations() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(LOCK_FILE_NAME), "version: 99\n").unwrap();

    let store = LockStore::new(temp.path());
    let registry = registry_with([("brew", Arc::new(MockBackend::new()))]);

    let err = apply(&store, &registry, &ApplyOptions::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unsupported lock version 99"));
}
