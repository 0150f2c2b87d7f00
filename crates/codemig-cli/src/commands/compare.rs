//! Compare command implementation.

use anyhow::{Context, Result};
use codemig::{compare, Runner};
use std::path::Path;

use crate::OutputFormat;

/// Runs the compare command.
///
/// Exits with code 1 when the two trees drift.
pub fn run(
    old_path: &Path,
    new_path: &Path,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<()> {
    let old_options = super::load_options(old_path, config)?;
    let new_options = super::load_options(new_path, config)?;

    let old = Runner::new(old_path, old_options)
        .context("Failed to open the old tree")?
        .extract();
    let new = Runner::new(new_path, new_options)
        .context("Failed to open the new tree")?
        .extract();

    let result = compare(&old.facts, &new.facts);
    super::output::print_compare(&result, format)?;

    if result.has_drift() {
        std::process::exit(1);
    }
    Ok(())
}
