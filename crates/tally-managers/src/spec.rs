//! Package specification parsing and identity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Canonical identity of a tracked package: manager plus name.
///
/// Two specs refer to the same tracked unit iff their [`key`]s match.
///
/// [`key`]: PackageSpec::key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageSpec {
    pub manager: String,
    pub name: String,
}

impl PackageSpec {
    pub fn new(manager: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            manager: manager.into(),
            name: name.into(),
        }
    }

    /// Unique key for reconciliation lookups.
    pub fn key(&self) -> String {
        format!("{}:{}", self.manager, self.name)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.manager, self.name)
    }
}

/// A user-supplied `[manager:]name` spec, parsed but not yet resolved
/// against a default manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpec {
    pub manager: Option<String>,
    pub name: String,
}

impl RawSpec {
    /// Parse the string form of a spec.
    ///
    /// Only the first `:` separates manager from name, so scoped names
    /// like `npm:@types/node` keep their `@` and any later colons.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::InvalidSpec {
                spec: input.to_string(),
                reason: "specification cannot be empty",
            });
        }

        match input.split_once(':') {
            Some(("", _)) => Err(Error::InvalidSpec {
                spec: input.to_string(),
                reason: "manager prefix cannot be empty",
            }),
            Some((_, "")) => Err(Error::InvalidSpec {
                spec: input.to_string(),
                reason: "package name cannot be empty",
            }),
            Some((manager, name)) => Ok(Self {
                manager: Some(manager.to_string()),
                name: name.to_string(),
            }),
            None => Ok(Self {
                manager: None,
                name: input.to_string(),
            }),
        }
    }

    /// Resolve into a full spec, falling back to the default manager
    /// when no prefix was given.
    pub fn resolve(self, default_manager: &str) -> PackageSpec {
        PackageSpec {
            manager: self
                .manager
                .unwrap_or_else(|| default_manager.to_string()),
            name: self.name,
        }
    }
}
