//! Configuration-directory resolution

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TALLY_DIR";

/// Directory name under the platform config root.
const APP_DIR: &str = "tally";

/// Resolve the tally configuration directory.
///
/// `$TALLY_DIR` wins when set; otherwise the platform configuration
/// root (`~/.config/tally` on Linux), falling back to `.tally` under
/// the home directory when no config root is known.
pub fn config_dir() -> PathBuf {
    resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV))
}

fn resolve_config_dir(env_override: Option<OsString>) -> PathBuf {
    if let Some(dir) = env_override
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    if let Some(root) = dirs::config_dir() {
        return root.join(APP_DIR);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(format!(".{APP_DIR}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let dir = resolve_config_dir(Some(OsString::from("/tmp/custom-tally")));
        assert_eq!(dir, PathBuf::from("/tmp/custom-tally"));
    }

    #[test]
    fn test_empty_override_ignored() {
        let dir = resolve_config_dir(Some(OsString::new()));
        assert!(dir.ends_with(APP_DIR) || dir.ends_with(".tally"));
    }

    #[test]
    fn test_default_under_config_root() {
        let dir = resolve_config_dir(None);
        assert!(dir.ends_with(APP_DIR) || dir.ends_with(".tally"));
    }
}
