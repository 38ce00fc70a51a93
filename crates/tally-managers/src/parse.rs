//! Output parsing helpers shared by backends

use std::collections::HashMap;

use serde::Deserialize;

use crate::{Error, Result};

/// Options for line-oriented list output parsing.
#[derive(Debug, Clone, Default)]
pub struct LineParseOptions<'a> {
    /// Skip lines that start with whitespace.
    pub skip_indented: bool,
    /// Skip lines that start with any of these prefixes.
    pub skip_prefixes: &'a [&'a str],
    /// Take the first whitespace-delimited token instead of the whole
    /// line.
    pub take_first_token: bool,
}

/// Parse command output into package names, one per line.
pub fn parse_lines(output: &str, opts: &LineParseOptions) -> Vec<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut packages = Vec::new();
    for line in trimmed.lines() {
        // Indentation check happens before trimming
        if opts.skip_indented && (line.starts_with(' ') || line.starts_with('\t')) {
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if opts.skip_prefixes.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        if opts.take_first_token {
            if let Some(token) = line.split_whitespace().next() {
                packages.push(token.to_string());
            }
        } else {
            packages.push(line.to_string());
        }
    }
    packages
}

#[derive(Debug, Deserialize)]
struct DependencyListing {
    #[serde(default)]
    dependencies: HashMap<String, serde_json::Value>,
}

/// Parse JSON output carrying a `dependencies` map into package names.
///
/// npm prints a single object; pnpm wraps it in a one-element array
/// (`array_wrapped`).
pub fn parse_json_dependencies(
    program: &str,
    output: &str,
    array_wrapped: bool,
) -> Result<Vec<String>> {
    let parse_error = |e: serde_json::Error| Error::OutputParse {
        program: program.to_string(),
        message: e.to_string(),
    };

    let mut packages: Vec<String> = if array_wrapped {
        let listings: Vec<DependencyListing> =
            serde_json::from_str(output).map_err(parse_error)?;
        listings
            .into_iter()
            .flat_map(|l| l.dependencies.into_keys())
            .collect()
    } else {
        let listing: DependencyListing =
            serde_json::from_str(output).map_err(parse_error)?;
        listing.dependencies.into_keys().collect()
    };

    packages.sort();
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_lines_plain() {
        let out = "git\nfzf\n\njq\n";
        assert_eq!(
            parse_lines(out, &LineParseOptions::default()),
            vec!["git", "fzf", "jq"]
        );
    }

    #[test]
    fn test_parse_lines_skip_indented_first_token() {
        // cargo install --list format
        let out = "cargo-edit v0.12.2:\n    cargo-add\n    cargo-rm\nripgrep v14.1.0:\n    rg\n";
        let opts = LineParseOptions {
            skip_indented: true,
            take_first_token: true,
            ..Default::default()
        };
        assert_eq!(parse_lines(out, &opts), vec!["cargo-edit", "ripgrep"]);
    }

    #[test]
    fn test_parse_lines_skip_prefixes() {
        let out = "*** LOCAL GEMS ***\n\ncolorize\nrake\n";
        let opts = LineParseOptions {
            skip_prefixes: &["***"],
            ..Default::default()
        };
        assert_eq!(parse_lines(out, &opts), vec!["colorize", "rake"]);
    }

    #[test]
    fn test_parse_lines_empty() {
        assert!(parse_lines("  \n ", &LineParseOptions::default()).is_empty());
    }

    #[test]
    fn test_parse_json_dependencies_object() {
        let out = r#"{"dependencies": {"typescript": {"version": "5.3.3"}, "prettier": {}}}"#;
        assert_eq!(
            parse_json_dependencies("npm", out, false).unwrap(),
            vec!["prettier", "typescript"]
        );
    }

    #[test]
    fn test_parse_json_dependencies_array() {
        let out = r#"[{"dependencies": {"typescript": {"version": "5.3.3"}}}]"#;
        assert_eq!(
            parse_json_dependencies("pnpm", out, true).unwrap(),
            vec!["typescript"]
        );
    }

    #[test]
    fn test_parse_json_dependencies_missing_key() {
        assert!(
            parse_json_dependencies("npm", "{}", false)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_json_dependencies_invalid() {
        assert!(matches!(
            parse_json_dependencies("npm", "not json", false),
            Err(Error::OutputParse { .. })
        ));
    }
}
