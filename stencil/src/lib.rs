//! stencil: template resolution and placeholder substitution engine
//!
//! The engine behind the `stencil` scaffolding CLI. It resolves a named
//! template set from a declarative registry, fetches the template tree
//! (local directory or remote git repository), derives a placeholder table
//! from the target name, and materializes the tree into a destination with
//! substitutions applied to templated files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use stencil::{Registry, ScaffoldKind, ScaffoldRequest};
//!
//! fn main() -> stencil::Result<()> {
//!     let registry = Registry::load(Path::new("stencil.toml"))?;
//!     let request = ScaffoldRequest {
//!         kind: ScaffoldKind::Module,
//!         name: "hello-world".to_string(),
//!         destination: PathBuf::from("."),
//!         template_set: None,
//!         module_type: None,
//!         remote_url: None,
//!     };
//!     let result = stencil::run(&registry, &request)?;
//!     println!("created {} files", result.written.len());
//!     Ok(())
//! }
//! ```
//!
//! # Guarantees and non-guarantees
//!
//! - Placeholder derivation is a pure function of the input name.
//! - Binary files are copied byte-for-byte, never textually transformed.
//! - Materialization is non-transactional: a failure mid-run leaves already
//!   written files in place and reports exactly which paths those are.
//! - Every external operation (clone, push) is attempted exactly once.

#![forbid(unsafe_code)]

pub mod error;
pub mod fetch;
pub mod git;
pub mod materialize;
pub mod placeholder;
pub mod registry;
pub mod scaffold;

pub use error::{Result, ScaffoldError};
pub use materialize::{ExtensionPolicy, MaterializationPlan, PlanEntry, TemplatePolicy};
pub use placeholder::PlaceholderMap;
pub use registry::{Registry, TemplateSet, TemplateSource};
pub use scaffold::{
    run, run_module, run_project, ModuleType, ScaffoldKind, ScaffoldRequest, ScaffoldResult,
};
