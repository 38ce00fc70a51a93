//! Shared subprocess execution for manager backends

use std::process::Stdio;

use tokio::process::Command;

use crate::{Error, Result};

/// Captured output of a finished command.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    /// stdout followed by stderr, for pattern matching and errors.
    pub combined: String,
}

/// Run a command to completion and capture its output.
///
/// Only a spawn failure is an `Err`; a non-zero exit is reported
/// through [`CommandOutput::success`] so callers can apply their own
/// idempotency rules.
pub async fn capture(program: &str, args: &[&str]) -> Result<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut combined = stdout.clone();
    combined.push_str(&stderr);

    Ok(CommandOutput {
        success: output.status.success(),
        stdout,
        combined,
    })
}

/// Run a command, failing on a non-zero exit.
pub async fn run(program: &str, args: &[&str]) -> Result<String> {
    let out = capture(program, args).await?;
    if out.success {
        Ok(out.stdout)
    } else {
        Err(Error::CommandFailed {
            program: program.to_string(),
            output: out.combined.trim().to_string(),
        })
    }
}

/// Run a command, treating a failing exit whose output matches any of
/// the given literal substrings as success.
///
/// Several manager CLIs exit non-zero for states that already satisfy
/// the request ("already installed", "not installed"); converging to
/// the desired state counts as success.
pub async fn run_idempotent(
    program: &str,
    args: &[&str],
    success_patterns: &[&str],
) -> Result<()> {
    let out = capture(program, args).await?;
    if out.success || output_matches(&out.combined, success_patterns) {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            program: program.to_string(),
            output: out.combined.trim().to_string(),
        })
    }
}

/// Case-insensitive substring match against command output.
pub fn output_matches(output: &str, patterns: &[&str]) -> bool {
    let lower = output.to_lowercase();
    patterns.iter().any(|p| lower.contains(&p.to_lowercase()))
}

/// Probe whether a command is present and responding.
///
/// Spawn failures and non-zero exits both map to `false`.
pub async fn command_available(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_matches_case_insensitive() {
        assert!(output_matches(
            "Warning: git is Already Installed",
            &["already installed"]
        ));
    }

    #[test]
    fn test_output_matches_any_pattern() {
        assert!(output_matches(
            "error: no such keg: /usr/local/Cellar/foo",
            &["is not installed", "no such keg"]
        ));
        assert!(!output_matches("error: permission denied", &["no such keg"]));
    }

    #[tokio::test]
    async fn test_command_available_missing_binary() {
        assert!(!command_available("tally-no-such-binary", &["--version"]).await);
    }

    #[tokio::test]
    async fn test_run_missing_binary_is_spawn_error() {
        let result = run("tally-no-such-binary", &[]).await;
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_run_idempotent_pattern_rescues_failure() {
        // `sh -c` gives a deterministic failing command with known output
        let result = run_idempotent(
            "sh",
            &["-c", "echo 'package is already installed' >&2; exit 1"],
            &["already installed"],
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_idempotent_unmatched_failure_propagates() {
        let result = run_idempotent(
            "sh",
            &["-c", "echo 'fatal: registry unreachable' >&2; exit 1"],
            &["already installed"],
        )
        .await;
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }
}
