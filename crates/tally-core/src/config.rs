//! User configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Fallback manager when none is configured or given.
pub const DEFAULT_MANAGER: &str = "brew";

/// Configuration file name inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "tally.yaml";

/// User configuration.
///
/// A missing or unreadable configuration file falls back to defaults;
/// a bad config must never block package operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manager used for specs without a `manager:` prefix.
    pub default_manager: Option<String>,
}

impl Config {
    /// Load configuration from `config_dir`, falling back to defaults.
    pub fn load_or_default(config_dir: &Path) -> Self {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        match tally_fs::yaml::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// The manager to use when a spec has no prefix.
    pub fn effective_default_manager(&self) -> &str {
        self.default_manager.as_deref().unwrap_or(DEFAULT_MANAGER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_or_default(temp.path());
        assert_eq!(config.effective_default_manager(), DEFAULT_MANAGER);
    }

    #[test]
    fn test_configured_default_manager() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "default_manager: cargo\n",
        )
        .unwrap();

        let config = Config::load_or_default(temp.path());
        assert_eq!(config.effective_default_manager(), "cargo");
    }

    #[test]
    fn test_unreadable_config_falls_back() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "default_manager: [").unwrap();

        let config = Config::load_or_default(temp.path());
        assert_eq!(config, Config::default());
    }
}
