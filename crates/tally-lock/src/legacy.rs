//! Legacy lock schemas and their one-shot migration
//!
//! Two older generations are recognized on read and upgraded to the
//! current document. The open metadata map of the middle generation is
//! parsed by the narrow typed step here and leaks nowhere else.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::document::Lock;

/// Middle generation: a flat list of generic resource entries with an
/// open metadata map. Only fully specified package resources survive
/// migration.
#[derive(Debug, Deserialize)]
pub(crate) struct LockV2 {
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_yaml::Value>,
}

/// Oldest generation: per-manager records carrying version and install
/// timestamp metadata.
#[derive(Debug, Deserialize)]
pub(crate) struct LockV1 {
    #[serde(default)]
    pub packages: BTreeMap<String, Vec<V1Entry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct V1Entry {
    #[serde(default)]
    pub name: String,
}

/// Convert a middle-generation document.
///
/// Entries with the wrong type or a missing/empty `manager` or `name`
/// are dropped with a warning rather than failing the migration.
pub(crate) fn migrate_v2(old: LockV2) -> Lock {
    let mut lock = Lock::new();
    for resource in old.resources {
        if resource.kind != "package" {
            continue;
        }

        let manager = resource.metadata.get("manager").and_then(|v| v.as_str());
        let name = resource.metadata.get("name").and_then(|v| v.as_str());

        match (manager, name) {
            (Some(manager), Some(name)) if !manager.is_empty() && !name.is_empty() => {
                lock.add_package(manager, name);
            }
            _ => {
                tracing::warn!(
                    ?manager,
                    ?name,
                    "skipping legacy package entry during migration"
                );
            }
        }
    }
    lock
}

/// Convert an oldest-generation document. Per-package version and
/// timestamp metadata is dropped; only the identity survives.
pub(crate) fn migrate_v1(old: LockV1) -> Lock {
    let mut lock = Lock::new();
    for (manager, entries) in old.packages {
        for entry in entries {
            if entry.name.is_empty() {
                tracing::warn!(%manager, "skipping legacy package entry with no name");
                continue;
            }
            lock.add_package(&manager, &entry.name);
        }
    }
    lock
}
