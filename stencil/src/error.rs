//! Error types for the scaffolding engine

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Scaffolding error taxonomy
///
/// Errors raised while resolving, fetching, or materializing a template are
/// terminal for the invocation. [`ScaffoldError::RemoteBootstrap`] is the one
/// exception: the orchestrator surfaces it as a warning because the scaffold
/// itself has already been written.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Registry definition file is missing, unreadable, or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Requested template set does not exist in the registry
    #[error("template set '{name}' not found (available: {})", available.join(", "))]
    NotFound {
        /// The set name that was requested
        name: String,
        /// Every set name the registry knows about
        available: Vec<String>,
    },

    /// Name fails the identifier pattern
    #[error("invalid name '{0}': use letters, digits, hyphen, or underscore")]
    InvalidName(String),

    /// Cloning or copying the template tree failed
    #[error("failed to fetch template from '{location}': {reason}")]
    Fetch {
        /// The template location that could not be fetched
        location: String,
        /// Human-readable failure reason
        reason: String,
    },

    /// A planned source file vanished before it could be copied
    ///
    /// Materialization is best-effort and non-transactional: `written` lists
    /// the destination paths that were already created before the failure.
    #[error("template file missing during materialization: {}", path.display())]
    SourceMissing {
        /// The source path that no longer exists
        path: PathBuf,
        /// Destination paths written before the failure, in order
        written: Vec<PathBuf>,
    },

    /// A version-control bootstrap step failed
    #[error("git {step} failed for remote '{url}': {reason}")]
    RemoteBootstrap {
        /// The git invocation that failed, e.g. `push -u origin main`
        step: String,
        /// The remote URL being bootstrapped
        url: String,
        /// Human-readable failure reason
        reason: String,
    },

    /// Underlying filesystem failure
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// The path the operation was touching
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it occurred at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
