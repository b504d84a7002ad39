//! Scaffold orchestration
//!
//! Sequences a single scaffold operation: resolve the template set, fetch
//! its tree into staging, plan the copy, derive placeholders, materialize,
//! and optionally bootstrap a remote repository. Every step runs exactly
//! once; there are no retries. Materialization is non-transactional, so a
//! mid-flight failure leaves a partially populated destination, which is
//! reported rather than hidden.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, ScaffoldError};
use crate::fetch::fetch;
use crate::git::bootstrap_remote;
use crate::materialize::{ExtensionPolicy, MaterializationPlan};
use crate::placeholder::{normalize_module_name, PlaceholderMap};
use crate::registry::Registry;

/// Name of the configuration artifact written for every scaffolded module
pub const MODULE_CONFIG_FILE: &str = ".config_template";

/// What kind of scaffold a request produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldKind {
    /// A full project tree
    Project,
    /// A standalone module
    Module,
}

/// Category of a scaffolded module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleType {
    /// Concise utility functions and helpers
    #[default]
    Util,
    /// Coordination of external or project-wide systems
    Manager,
    /// Self-contained feature implementation
    Plugin,
}

impl ModuleType {
    /// Every module type, in display order
    pub const ALL: [Self; 3] = [Self::Util, Self::Manager, Self::Plugin];

    /// Lowercase identifier used in configuration and folder paths
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Util => "util",
            Self::Manager => "manager",
            Self::Plugin => "plugin",
        }
    }

    /// Short description for interactive choosers
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Util => "Concise utility functions and helpers",
            Self::Manager => "Coordination of external or project-wide systems",
            Self::Plugin => "Self-contained feature implementation",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "util" => Ok(Self::Util),
            "manager" => Ok(Self::Manager),
            "plugin" => Ok(Self::Plugin),
            other => Err(ScaffoldError::Config(format!(
                "unknown module type '{other}' (expected util, manager, or plugin)"
            ))),
        }
    }
}

/// Read-only description of one scaffold operation
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Project or module flow
    pub kind: ScaffoldKind,
    /// Name of the thing being scaffolded
    pub name: String,
    /// Directory the scaffold root is created under
    pub destination: PathBuf,
    /// Template set to use; `None` selects the registry default
    pub template_set: Option<String>,
    /// Module category, used by the module flow only
    pub module_type: Option<ModuleType>,
    /// Remote to initialize and push after a successful scaffold
    pub remote_url: Option<String>,
}

/// Outcome of a completed scaffold
///
/// A populated `warning` means Completed-with-warning: the scaffold is on
/// disk but the remote bootstrap failed.
#[derive(Debug)]
pub struct ScaffoldResult {
    /// Name actually used, after any normalization
    pub name: String,
    /// Root directory of the new scaffold
    pub root: PathBuf,
    /// Every destination path written, in order
    pub written: Vec<PathBuf>,
    /// Remote bootstrap failure, when one occurred
    pub warning: Option<String>,
}

/// Run the flow matching `req.kind`
///
/// # Errors
///
/// Propagates any error from [`run_project`] or [`run_module`].
pub fn run(registry: &Registry, req: &ScaffoldRequest) -> Result<ScaffoldResult> {
    match req.kind {
        ScaffoldKind::Project => run_project(registry, req),
        ScaffoldKind::Module => run_module(registry, req),
    }
}

/// Scaffold a new project from the requested template set
///
/// # Errors
///
/// Fails with the registry, fetch, placeholder, or materialization error of
/// the first failing step. A remote bootstrap failure does not fail the
/// scaffold; it is returned as a warning.
pub fn run_project(registry: &Registry, req: &ScaffoldRequest) -> Result<ScaffoldResult> {
    let set = registry.resolve(req.template_set.as_deref())?;
    let source = set.project_source()?;
    tracing::info!(set = %set.name, template = %source, "scaffolding project");

    let root = scaffold_root(req)?;
    let staging = tempfile::tempdir().map_err(|e| ScaffoldError::io(&req.destination, e))?;
    let staged = fetch(source, staging.path())?;

    let plan = MaterializationPlan::scan(&staged, &root, &ExtensionPolicy)?;
    let placeholders = PlaceholderMap::derive(&req.name)?;
    let written = plan.materialize(&placeholders)?;

    let warning = maybe_bootstrap(req, &root);
    Ok(ScaffoldResult {
        name: req.name.clone(),
        root,
        written,
        warning,
    })
}

/// Scaffold a new module from the requested template set
///
/// The module name is normalized to snake case before use; the returned
/// result carries the normalized name. After materialization the module's
/// configuration artifact is written alongside the template files.
///
/// # Errors
///
/// Same failure behavior as [`run_project`].
pub fn run_module(registry: &Registry, req: &ScaffoldRequest) -> Result<ScaffoldResult> {
    let set = registry.resolve(req.template_set.as_deref())?;
    let source = set.module_source()?;

    if !crate::placeholder::is_valid_name(&req.name) {
        return Err(ScaffoldError::InvalidName(req.name.clone()));
    }
    let name = normalize_module_name(&req.name);
    let module_type = req.module_type.unwrap_or_default();
    tracing::info!(set = %set.name, %name, module_type = %module_type, "scaffolding module");

    let root = req.destination.join(&name);
    ensure_absent(&root)?;

    let staging = tempfile::tempdir().map_err(|e| ScaffoldError::io(&req.destination, e))?;
    let staged = fetch(source, staging.path())?;

    let plan = MaterializationPlan::scan(&staged, &root, &ExtensionPolicy)?;
    let placeholders = PlaceholderMap::derive(&name)?;
    let mut written = plan.materialize(&placeholders)?;

    written.push(write_module_config(&root, &name, module_type)?);

    let warning = maybe_bootstrap(req, &root);
    Ok(ScaffoldResult {
        name,
        root,
        written,
        warning,
    })
}

/// Compute and reserve the scaffold root for a project request
fn scaffold_root(req: &ScaffoldRequest) -> Result<PathBuf> {
    let root = req.destination.join(&req.name);
    ensure_absent(&root)?;
    Ok(root)
}

fn ensure_absent(root: &Path) -> Result<()> {
    if root.exists() {
        return Err(ScaffoldError::Config(format!(
            "directory '{}' already exists",
            root.display()
        )));
    }
    Ok(())
}

/// Write the module's configuration artifact
///
/// The artifact is a JSON object the consuming runtime's configuration
/// loader reads back; its shape is part of the external interface.
fn write_module_config(root: &Path, name: &str, module_type: ModuleType) -> Result<PathBuf> {
    let artifact = serde_json::json!({
        "name": name,
        "type": module_type.as_str(),
        "folder_path": format!("{}s/{name}", module_type.as_str()),
        "version": "0.0.1",
        "requirements": [],
    });

    let path = root.join(MODULE_CONFIG_FILE);
    fs::create_dir_all(root).map_err(|e| ScaffoldError::io(root, e))?;
    let mut content = serde_json::to_string_pretty(&artifact)
        .map_err(|e| ScaffoldError::Config(format!("cannot encode module config: {e}")))?;
    content.push('\n');
    fs::write(&path, content).map_err(|e| ScaffoldError::io(&path, e))?;
    Ok(path)
}

/// Attempt the optional remote bootstrap, mapping failure to a warning
fn maybe_bootstrap(req: &ScaffoldRequest, root: &Path) -> Option<String> {
    let url = req.remote_url.as_deref()?;
    match bootstrap_remote(root, url) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(%err, "remote bootstrap failed; scaffold kept");
            Some(err.to_string())
        }
    }
}
