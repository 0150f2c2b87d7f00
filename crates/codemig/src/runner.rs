//! The run coordinator: file discovery, per-file dispatch, aggregation.

use std::path::{Path, PathBuf};

use codemig_core::{load_source, Diagnostic, Fact, FactSet, SourceUnit};
use codemig_extract::{ExtractOptions, FactExtractor};
use codemig_rewrite::{rewrite_unit, RuleTable};
use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

/// Options controlling file discovery and extraction.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory names skipped during the walk.
    pub ignore_dirs: Vec<String>,
    /// File names skipped during the walk.
    pub ignore_files: Vec<String>,
    /// Extension allow-list.
    pub extensions: Vec<String>,
    /// Files larger than this are recorded as `Skipped`.
    pub max_file_bytes: usize,
    /// Fact-recognition options.
    pub extract: ExtractOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: vec![
                "node_modules".into(),
                ".git".into(),
                "build".into(),
                "dist".into(),
                "coverage".into(),
            ],
            ignore_files: Vec::new(),
            extensions: vec!["js".into(), "jsx".into(), "ts".into(), "tsx".into()],
            max_file_bytes: 1024 * 1024,
            extract: ExtractOptions::default(),
        }
    }
}

/// A fatal runner error. Per-file problems are [`Diagnostic`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The run root does not exist or is not a directory.
    #[error("cannot read root directory {path}")]
    Root {
        /// Root that failed.
        path: PathBuf,
    },
}

/// The aggregated result of an extraction run.
#[derive(Debug)]
pub struct ExtractReport {
    /// All facts, deduplicated across files, first-seen-wins.
    pub facts: FactSet,
    /// Per-file diagnostics, in file order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files dispatched.
    pub files_processed: usize,
}

/// One file's rewrite output.
#[derive(Debug)]
pub struct RewrittenFile {
    /// Path relative to the run root.
    pub path: PathBuf,
    /// Regenerated source text.
    pub new_text: String,
    /// Whether the text differs from the original.
    pub changed: bool,
}

/// The aggregated result of a rewrite run. Nothing is written to disk;
/// callers decide what to do with the new text.
#[derive(Debug)]
pub struct RewriteReport {
    /// Per-file outputs, in file order, parse failures excluded.
    pub files: Vec<RewrittenFile>,
    /// Per-file diagnostics, in file order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files dispatched.
    pub files_processed: usize,
}

/// Walks a directory and dispatches each file to extraction or rewriting.
///
/// Files are processed in parallel; results are merged in deterministic
/// (sorted-path) order. A single file's failure becomes a diagnostic and
/// never aborts the run.
#[derive(Debug)]
pub struct Runner {
    root: PathBuf,
    options: RunOptions,
    files: Vec<PathBuf>,
}

impl Runner {
    /// Creates a runner for a root directory, discovering its files.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Root`] when the root is not a readable directory.
    pub fn new(root: impl Into<PathBuf>, options: RunOptions) -> Result<Self, RunError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RunError::Root { path: root });
        }
        let files = discover(&root, &options);
        info!(root = %root.display(), files = files.len(), "runner ready");
        Ok(Self {
            root,
            options,
            files,
        })
    }

    /// The discovered files, sorted, relative to the root.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Extracts facts from every discovered file.
    #[must_use]
    pub fn extract(&self) -> ExtractReport {
        let extractor = FactExtractor::new();
        let per_file: Vec<(Vec<Fact>, Vec<Diagnostic>)> = self
            .files
            .par_iter()
            .map(|path| match self.load(path) {
                Ok(unit) => extractor.extract(&unit, &self.options.extract),
                Err(diag) => (Vec::new(), vec![diag]),
            })
            .collect();

        let mut facts = FactSet::new();
        let mut diagnostics = Vec::new();
        for (file_facts, file_diags) in per_file {
            for fact in file_facts {
                facts.insert(fact);
            }
            diagnostics.extend(file_diags);
        }
        ExtractReport {
            facts,
            diagnostics,
            files_processed: self.files.len(),
        }
    }

    /// Rewrites every discovered file against a rule table.
    #[must_use]
    pub fn rewrite(&self, table: &RuleTable) -> RewriteReport {
        let per_file: Vec<(Option<RewrittenFile>, Vec<Diagnostic>)> = self
            .files
            .par_iter()
            .map(|path| match self.load(path) {
                Ok(unit) => {
                    let outcome = rewrite_unit(&unit, table);
                    let file = RewrittenFile {
                        path: path.clone(),
                        new_text: outcome.new_text,
                        changed: outcome.changed,
                    };
                    (Some(file), outcome.diagnostics)
                }
                Err(diag) => (None, vec![diag]),
            })
            .collect();

        let mut files = Vec::new();
        let mut diagnostics = Vec::new();
        for (file, file_diags) in per_file {
            files.extend(file);
            diagnostics.extend(file_diags);
        }
        RewriteReport {
            files,
            diagnostics,
            files_processed: self.files.len(),
        }
    }

    /// Loads one file as a [`SourceUnit`], keyed by its root-relative path.
    fn load(&self, relative: &Path) -> Result<SourceUnit, Diagnostic> {
        let full = self.root.join(relative);
        let text = std::fs::read_to_string(&full)
            .map_err(|e| Diagnostic::skipped(relative, format!("unreadable: {e}")))?;
        load_source(relative, text, self.options.max_file_bytes)
    }
}

/// Enumerates candidate files under the root, sorted, root-relative.
fn discover(root: &Path, options: &RunOptions) -> Vec<PathBuf> {
    let ignore_dirs = options.ignore_dirs.clone();
    let mut builder = WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if !is_dir || entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !ignore_dirs.iter().any(|d| *d == name)
    });

    let mut files = Vec::new();
    for entry in builder.build() {
        let Ok(entry) = entry else {
            debug!("walk error, skipping entry");
            continue;
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !options.extensions.iter().any(|e| e == ext) {
            continue;
        }
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if options.ignore_files.iter().any(|f| *f == name) {
            continue;
        }
        files.push(path.strip_prefix(root).unwrap_or(path).to_path_buf());
    }
    files.sort();
    files
}
