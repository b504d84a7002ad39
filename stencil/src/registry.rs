//! Template set registry
//!
//! The registry is loaded once per invocation from a declarative TOML file
//! and is immutable afterwards. It is an explicitly constructed value passed
//! to the orchestrator, not ambient global state, so the core stays testable
//! with nothing but the definition file itself.
//!
//! # Definition file
//!
//! ```toml
//! [defaults]
//! project-template = "https://github.com/example/project-template.git"
//! module-template = "https://github.com/example/module-template.git"
//! runtime-version = ">=3.10"
//!
//! [sets.minimal]
//! description = "Bare project without module wiring"
//! project-template = "./templates/minimal"
//! ```
//!
//! Named sets inherit any reference they do not declare from `[defaults]`.
//! When no `[sets.default]` table is present, a set named `default` is
//! synthesized from `[defaults]` so `resolve(None)` always has a target.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ScaffoldError};

/// Name of the set returned when no explicit set is requested
pub const DEFAULT_SET: &str = "default";

/// Location of a template tree: a local directory or a remote git repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Directory on the local filesystem
    Local(PathBuf),
    /// Remote repository URL, handed to `git clone`
    Remote(String),
}

impl TemplateSource {
    /// Classify a raw reference string
    ///
    /// Anything with a URL scheme or an `git@` prefix is treated as remote;
    /// everything else is a local path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.contains("://") || raw.starts_with("git@") {
            Self::Remote(raw.to_string())
        } else {
            Self::Local(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// A named bundle of template references plus metadata
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Unique set name within the registry
    pub name: String,
    /// Template tree used by the project flow, if any
    pub project_template: Option<TemplateSource>,
    /// Template tree used by the module flow, if any
    pub module_template: Option<TemplateSource>,
    /// Human-readable description shown by listings and choosers
    pub description: String,
}

impl TemplateSet {
    /// The project template reference, required by the project flow
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] when the set declares no project
    /// template and inherits none.
    pub fn project_source(&self) -> Result<&TemplateSource> {
        self.project_template.as_ref().ok_or_else(|| {
            ScaffoldError::Config(format!(
                "template set '{}' has no project-template reference",
                self.name
            ))
        })
    }

    /// The module template reference, required by the module flow
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] when the set declares no module
    /// template and inherits none.
    pub fn module_source(&self) -> Result<&TemplateSource> {
        self.module_template.as_ref().ok_or_else(|| {
            ScaffoldError::Config(format!(
                "template set '{}' has no module-template reference",
                self.name
            ))
        })
    }
}

/// On-disk shape of the definition file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RegistryFile {
    defaults: DefaultsSection,
    #[serde(default)]
    sets: BTreeMap<String, SetSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct DefaultsSection {
    project_template: Option<String>,
    module_template: Option<String>,
    runtime_version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SetSection {
    description: Option<String>,
    project_template: Option<String>,
    module_template: Option<String>,
}

/// Immutable collection of template sets loaded from a definition file
#[derive(Debug)]
pub struct Registry {
    sets: BTreeMap<String, TemplateSet>,
    runtime_version: Option<String>,
}

impl Registry {
    /// Load and validate the definition file at `path`
    ///
    /// The file is read exactly once; the resulting registry is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] when the file cannot be read, is not
    /// valid TOML, or is missing the required default references. Duplicate
    /// set names are rejected by the TOML parser itself.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Config(format!(
                "cannot read definition file '{}': {e}",
                path.display()
            ))
        })?;

        let file: RegistryFile = toml::from_str(&raw).map_err(|e| {
            ScaffoldError::Config(format!("malformed definition file '{}': {e}", path.display()))
        })?;

        if file.defaults.project_template.is_none() {
            return Err(ScaffoldError::Config(format!(
                "definition file '{}' is missing defaults.project-template",
                path.display()
            )));
        }
        if file.defaults.module_template.is_none() {
            return Err(ScaffoldError::Config(format!(
                "definition file '{}' is missing defaults.module-template",
                path.display()
            )));
        }

        let mut sets = BTreeMap::new();
        for (name, section) in &file.sets {
            sets.insert(name.clone(), build_set(name, section, &file.defaults));
        }
        sets.entry(DEFAULT_SET.to_string()).or_insert_with(|| {
            build_set(DEFAULT_SET, &SetSection::default(), &file.defaults)
        });

        tracing::debug!(sets = sets.len(), "registry loaded");

        Ok(Self {
            sets,
            runtime_version: file.defaults.runtime_version,
        })
    }

    /// Resolve a template set by name
    ///
    /// `None` resolves to the designated default set.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::NotFound`] naming the requested set and
    /// listing every known set name.
    pub fn resolve(&self, name: Option<&str>) -> Result<&TemplateSet> {
        let wanted = name.unwrap_or(DEFAULT_SET);
        self.sets.get(wanted).ok_or_else(|| ScaffoldError::NotFound {
            name: wanted.to_string(),
            available: self.sets.keys().cloned().collect(),
        })
    }

    /// All known sets, ordered by name
    pub fn sets(&self) -> impl Iterator<Item = &TemplateSet> {
        self.sets.values()
    }

    /// Accepted runtime version range declared by the definition file, if any
    #[must_use]
    pub fn runtime_version(&self) -> Option<&str> {
        self.runtime_version.as_deref()
    }
}

fn build_set(name: &str, section: &SetSection, defaults: &DefaultsSection) -> TemplateSet {
    let project = section
        .project_template
        .as_deref()
        .or(defaults.project_template.as_deref());
    let module = section
        .module_template
        .as_deref()
        .or(defaults.module_template.as_deref());

    TemplateSet {
        name: name.to_string(),
        project_template: project.map(TemplateSource::parse),
        module_template: module.map(TemplateSource::parse),
        description: section
            .description
            .clone()
            .unwrap_or_else(|| "No description".to_string()),
    }
}
