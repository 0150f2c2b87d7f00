//! Extract command implementation.

use anyhow::{Context, Result};
use codemig::Runner;
use std::path::Path;

use crate::OutputFormat;

/// Runs the extract command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let options = super::load_options(path, config)?;
    let runner = Runner::new(path, options).context("Failed to open the target directory")?;

    tracing::info!("Extracting facts from {} file(s)", runner.files().len());
    let report = runner.extract();

    super::output::print_extract(&report, format, output)
}
