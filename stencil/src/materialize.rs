//! Materialization plan construction and execution
//!
//! A [`MaterializationPlan`] is an ordered list of copy operations built by
//! walking a staged template tree. Executing the plan is best-effort and
//! non-transactional: a failure part-way through leaves everything already
//! written in place, and the error reports exactly which paths those are.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};
use crate::placeholder::PlaceholderMap;

/// Extension carried by files that always receive substitution; it is
/// stripped from the destination name.
pub const TEMPLATE_SUFFIX: &str = "tmpl";

/// Decides whether a template file receives textual substitution
///
/// The predicate sees the path relative to the template root. Files it
/// rejects are copied byte-for-byte, which is what keeps binary assets safe
/// from placeholder corruption.
pub trait TemplatePolicy {
    /// `true` when filename and content substitution applies to `relative`
    fn is_templated(&self, relative: &Path) -> bool;
}

impl<F> TemplatePolicy for F
where
    F: Fn(&Path) -> bool,
{
    fn is_templated(&self, relative: &Path) -> bool {
        self(relative)
    }
}

/// Default policy: `.tmpl` suffix or a known text extension
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionPolicy;

impl ExtensionPolicy {
    const TEXT_EXTENSIONS: &'static [&'static str] = &[
        "py", "rs", "toml", "yaml", "yml", "json", "md", "txt", "html", "css", "js", "cfg", "ini",
        "sh", "env",
    ];
}

impl TemplatePolicy for ExtensionPolicy {
    fn is_templated(&self, relative: &Path) -> bool {
        relative
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext == TEMPLATE_SUFFIX || Self::TEXT_EXTENSIONS.contains(&ext)
            })
    }
}

/// One planned copy operation
#[derive(Debug, Clone)]
pub struct PlanEntry {
    /// Absolute path of the staged source file
    pub source: PathBuf,
    /// Destination path relative to the plan's destination root; may still
    /// contain placeholder tokens
    pub dest: PathBuf,
    /// Whether filename and content substitution applies
    pub templated: bool,
}

/// Ordered sequence of copy operations for one scaffold
#[derive(Debug)]
pub struct MaterializationPlan {
    dest_root: PathBuf,
    entries: Vec<PlanEntry>,
}

impl MaterializationPlan {
    /// Enumerate every file under `staged_root` into a plan targeting
    /// `dest_root`
    ///
    /// Entries are ordered by file name for deterministic execution. Any
    /// `.git` directory in the staged tree is skipped. The `.tmpl` suffix is
    /// removed from destination names at plan time; placeholder tokens in
    /// names are left for execution time.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] when the staged tree cannot be walked.
    pub fn scan(
        staged_root: &Path,
        dest_root: &Path,
        policy: &dyn TemplatePolicy,
    ) -> Result<Self> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(staged_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != std::ffi::OsStr::new(".git"));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(staged_root).to_path_buf();
                ScaffoldError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(staged_root).map_err(|_| {
                ScaffoldError::Config(format!(
                    "staged path '{}' escapes template root",
                    entry.path().display()
                ))
            })?;

            let templated = policy.is_templated(relative);
            entries.push(PlanEntry {
                source: entry.path().to_path_buf(),
                dest: strip_template_suffix(relative),
                templated,
            });
        }

        tracing::debug!(
            files = entries.len(),
            root = %staged_root.display(),
            "materialization plan built"
        );

        Ok(Self {
            dest_root: dest_root.to_path_buf(),
            entries,
        })
    }

    /// Execute the plan, substituting `placeholders` into templated entries
    ///
    /// Destination directories are created as needed and existing files are
    /// overwritten; there is no merge logic and no rollback. Returns the
    /// destination paths actually written, in execution order.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::SourceMissing`] when a planned source no
    /// longer exists, carrying the paths written before the failure. I/O
    /// failures surface as [`ScaffoldError::Io`].
    pub fn materialize(&self, placeholders: &PlaceholderMap) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for entry in &self.entries {
            if !entry.source.is_file() {
                return Err(ScaffoldError::SourceMissing {
                    path: entry.source.clone(),
                    written,
                });
            }

            let relative = placeholders.apply(&entry.dest.to_string_lossy());
            let dest = self.dest_root.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
            }

            if entry.templated {
                let content = fs::read_to_string(&entry.source)
                    .map_err(|e| ScaffoldError::io(&entry.source, e))?;
                fs::write(&dest, placeholders.apply(&content))
                    .map_err(|e| ScaffoldError::io(&dest, e))?;
            } else {
                fs::copy(&entry.source, &dest).map_err(|e| ScaffoldError::io(&dest, e))?;
            }

            tracing::debug!(path = %dest.display(), templated = entry.templated, "wrote file");
            written.push(dest);
        }

        Ok(written)
    }

    /// Planned operations, in execution order
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Directory the plan writes into
    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Number of planned operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the staged tree contained no files
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remove a trailing `.tmpl` from the file name, leaving other extensions
fn strip_template_suffix(relative: &Path) -> PathBuf {
    let is_tmpl = relative
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == TEMPLATE_SUFFIX);
    if is_tmpl {
        relative.with_extension("")
    } else {
        relative.to_path_buf()
    }
}
