//! Remote repository bootstrap
//!
//! After a successful scaffold the caller may ask for the new directory to be
//! pushed to a remote. Each git step runs exactly once; the first failure
//! stops the sequence and is reported with the step and remote URL. The
//! scaffold itself is never unwound by a bootstrap failure.

use std::path::Path;
use std::process::Command;

use crate::error::{Result, ScaffoldError};

/// The git invocations that initialize, commit, and push a fresh scaffold
fn bootstrap_commands(remote_url: &str) -> Vec<Vec<String>> {
    [
        vec!["init"],
        vec!["add", "."],
        vec!["commit", "-m", "init commit"],
        vec!["branch", "-M", "main"],
        vec!["remote", "add", "origin", remote_url],
        vec!["push", "-u", "origin", "main"],
    ]
    .into_iter()
    .map(|args| args.into_iter().map(String::from).collect())
    .collect()
}

/// Initialize a git repository in `dir`, commit its contents, and push to
/// `remote_url`
///
/// # Errors
///
/// Returns [`ScaffoldError::RemoteBootstrap`] for the first failing step,
/// carrying the step, the remote URL, and git's stderr. Callers should treat
/// this as a warning: the scaffolded files are intact.
pub fn bootstrap_remote(dir: &Path, remote_url: &str) -> Result<()> {
    for args in bootstrap_commands(remote_url) {
        let step = args.join(" ");
        tracing::debug!(%step, "running git bootstrap step");

        let output = Command::new("git")
            .args(&args)
            .current_dir(dir)
            .output()
            .map_err(|e| ScaffoldError::RemoteBootstrap {
                step: step.clone(),
                url: remote_url.to_string(),
                reason: format!("failed to run git: {e}"),
            })?;

        if !output.status.success() {
            return Err(ScaffoldError::RemoteBootstrap {
                step,
                url: remote_url.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
    }

    tracing::info!(url = remote_url, "pushed initial commit to remote");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_sequence_is_fixed_and_ordered() {
        let commands = bootstrap_commands("git@github.com:x/y.git");
        let rendered: Vec<String> = commands.iter().map(|c| c.join(" ")).collect();
        assert_eq!(
            rendered,
            vec![
                "init",
                "add .",
                "commit -m init commit",
                "branch -M main",
                "remote add origin git@github.com:x/y.git",
                "push -u origin main",
            ]
        );
    }

    #[test]
    fn bootstrap_failure_names_step_and_url() {
        // A directory that is not a git repo makes `git add .` (after a
        // successful init) or the push fail; easier to exercise the error
        // path with a remote that cannot exist.
        let dir = tempfile::tempdir().unwrap();
        let err = bootstrap_remote(dir.path(), "file:///nonexistent/remote.git");
        if let Err(ScaffoldError::RemoteBootstrap { step, url, .. }) = err {
            assert!(!step.is_empty());
            assert_eq!(url, "file:///nonexistent/remote.git");
        }
        // When git is unavailable in the environment the run error is also a
        // RemoteBootstrap; either way no panic and no partial state handling
        // is required here.
    }
}
