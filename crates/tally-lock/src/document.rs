//! The lock document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current lock schema version. Older generations are migrated on
/// read; newer ones are rejected.
pub const LOCK_VERSION: u32 = 3;

/// The persisted desired-state document: which packages each manager
/// should have installed.
///
/// Manager keys and package lists stay sorted so serialized output is
/// deterministic and diff-friendly. A manager key is removed entirely
/// once its list empties, so no empty-list entries persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    pub version: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<String, Vec<String>>,
}

impl Lock {
    /// Create an empty lock at the current version.
    pub fn new() -> Self {
        Self {
            version: LOCK_VERSION,
            packages: BTreeMap::new(),
        }
    }

    /// Track a package under its manager, keeping the list sorted.
    /// Adding an already-tracked package is a no-op.
    pub fn add_package(&mut self, manager: &str, name: &str) {
        let packages = self.packages.entry(manager.to_string()).or_default();
        if packages.iter().any(|p| p == name) {
            return;
        }
        packages.push(name.to_string());
        packages.sort();
    }

    /// Stop tracking a package. Removing an absent package is a no-op;
    /// the manager key is dropped once its list empties.
    pub fn remove_package(&mut self, manager: &str, name: &str) {
        let Some(packages) = self.packages.get_mut(manager) else {
            return;
        };
        packages.retain(|p| p != name);
        if packages.is_empty() {
            self.packages.remove(manager);
        }
    }

    /// Check whether a package is tracked.
    pub fn has_package(&self, manager: &str, name: &str) -> bool {
        self.packages
            .get(manager)
            .is_some_and(|packages| packages.iter().any(|p| p == name))
    }

    /// All packages tracked under a manager.
    pub fn packages(&self, manager: &str) -> &[String] {
        self.packages
            .get(manager)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every manager under which `name` is tracked. The same name may
    /// independently be tracked under several managers.
    pub fn find_package(&self, name: &str) -> Vec<String> {
        self.packages
            .iter()
            .filter(|(_, packages)| packages.iter().any(|p| p == name))
            .map(|(manager, _)| manager.clone())
            .collect()
    }

    /// All tracked `manager:name` keys, sorted.
    pub fn all_packages(&self) -> Vec<String> {
        let mut keys: Vec<_> = self
            .packages
            .iter()
            .flat_map(|(manager, packages)| {
                packages.iter().map(move |name| format!("{manager}:{name}"))
            })
            .collect();
        keys.sort();
        keys
    }

    /// Total number of tracked packages across all managers.
    pub fn package_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }
}

impl Default for Lock {
    fn default() -> Self {
        Self::new()
    }
}
