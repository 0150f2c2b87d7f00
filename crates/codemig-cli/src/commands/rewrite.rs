//! Rewrite command implementation.

use anyhow::{Context, Result};
use codemig::{DiagnosticKind, RuleTable, Runner};
use std::path::Path;

use crate::OutputFormat;

/// Runs the rewrite command.
///
/// Dry run by default; `--write` writes changed files back to disk. Exits
/// with code 1 when any element needs manual review.
pub fn run(
    path: &Path,
    rules: &Path,
    write: bool,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<()> {
    let table = RuleTable::from_file(rules)
        .with_context(|| format!("Failed to load rule table: {}", rules.display()))?;
    let options = super::load_options(path, config)?;
    let runner = Runner::new(path, options).context("Failed to open the target directory")?;

    tracing::info!(
        "Rewriting {} file(s) with {} rule(s)",
        runner.files().len(),
        table.rules.len()
    );
    let report = runner.rewrite(&table);

    let mut written = 0;
    if write {
        for file in report.files.iter().filter(|f| f.changed) {
            let full = path.join(&file.path);
            std::fs::write(&full, &file.new_text)
                .with_context(|| format!("Failed to write {}", full.display()))?;
            written += 1;
        }
    }

    super::output::print_rewrite(&report, written, write, format)?;

    let needs_review = report
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::ManualReview);
    if needs_review {
        std::process::exit(1);
    }
    Ok(())
}
