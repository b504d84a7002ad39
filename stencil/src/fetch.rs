//! Template tree retrieval
//!
//! Local template references are used in place; remote references are cloned
//! into a caller-owned staging directory with `git` and have their history
//! stripped. Every fetch is attempted exactly once; failures surface
//! verbatim as [`ScaffoldError::Fetch`] with no retry.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, ScaffoldError};
use crate::registry::TemplateSource;

/// Obtain the template tree for `source`, returning the directory that holds
/// it
///
/// For [`TemplateSource::Local`] the existing directory is returned as-is;
/// nothing is copied. For [`TemplateSource::Remote`] the repository is cloned
/// into `staging` and its `.git` directory removed.
///
/// # Errors
///
/// Returns [`ScaffoldError::Fetch`] when the local path is not a directory or
/// the clone fails; git's stderr is carried in the failure reason.
pub fn fetch(source: &TemplateSource, staging: &Path) -> Result<PathBuf> {
    match source {
        TemplateSource::Local(path) => {
            if !path.is_dir() {
                return Err(ScaffoldError::Fetch {
                    location: path.display().to_string(),
                    reason: "not an existing directory".to_string(),
                });
            }
            tracing::debug!(path = %path.display(), "using local template tree");
            Ok(path.clone())
        }
        TemplateSource::Remote(url) => clone_remote(url, staging),
    }
}

fn clone_remote(url: &str, staging: &Path) -> Result<PathBuf> {
    tracing::info!(url, "cloning template repository");

    let output = Command::new("git")
        .arg("clone")
        .arg("--depth=1")
        .arg(url)
        .arg(staging)
        .output()
        .map_err(|e| ScaffoldError::Fetch {
            location: url.to_string(),
            reason: format!("failed to run git: {e}"),
        })?;

    if !output.status.success() {
        return Err(ScaffoldError::Fetch {
            location: url.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // The clone becomes plain files; its history does not belong to the
    // scaffold.
    let git_dir = staging.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir).map_err(|e| ScaffoldError::io(&git_dir, e))?;
    }

    Ok(staging.to_path_buf())
}
