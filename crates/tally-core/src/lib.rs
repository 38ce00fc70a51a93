//! Core orchestration for tally
//!
//! Reconciles the lock file's desired state against what the manager
//! backends report as installed, and provides the batch operations
//! that converge the host toward desired state.

pub mod apply;
pub mod config;
pub mod error;
pub mod operations;
pub mod reconcile;

pub use apply::{ApplyOptions, apply};
pub use config::Config;
pub use error::{Error, Result};
pub use operations::{
    BatchSummary, InstallOptions, OperationResult, OperationStatus, UninstallOptions,
    install_packages, uninstall_packages,
};
pub use reconcile::{
    GatherOptions, ReconcileResult, actual_installed, actual_installed_with,
    desired_from_lock, reconcile, reconcile_from_lock, reconcile_from_lock_with,
};
