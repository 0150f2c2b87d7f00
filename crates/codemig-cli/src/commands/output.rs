//! Shared output formatting for reports.

use anyhow::Result;
use codemig::{ComparisonResult, Diagnostic, ExtractReport, Fact, FactKind, RewriteReport};
use std::path::Path;

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// All fact kinds, in report order.
const KINDS: &[FactKind] = &[
    FactKind::ApiCall,
    FactKind::RouteDef,
    FactKind::StateHook,
    FactKind::ReduxAction,
    FactKind::ReduxReducer,
    FactKind::ContextProvider,
    FactKind::ComponentUsage,
];

/// Prints (or writes) an extraction report.
pub fn print_extract(
    report: &ExtractReport,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_extract_text(report),
        OutputFormat::Json => {
            let facts: Vec<&Fact> = report.facts.iter().collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "facts": facts,
                "diagnostics": report.diagnostics,
                "files_processed": report.files_processed,
            }))?
        }
    };
    emit(&rendered, output)
}

fn render_extract_text(report: &ExtractReport) -> String {
    let mut out = String::new();
    for kind in KINDS {
        let facts: Vec<&Fact> = report.facts.of_kind(*kind).collect();
        if facts.is_empty() {
            continue;
        }
        out.push_str(&format!("{kind} ({})\n", facts.len()));
        for fact in facts {
            out.push_str(&format!("  {} at {}\n", fact.identity_key, fact.location));
        }
        out.push('\n');
    }
    push_diagnostics(&mut out, &report.diagnostics);
    out.push_str(&format!(
        "{GREEN}{} fact(s) from {} file(s), {} diagnostic(s){RESET}\n",
        report.facts.len(),
        report.files_processed,
        report.diagnostics.len()
    ));
    out
}

/// Prints a comparison report.
pub fn print_compare(result: &ComparisonResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_compare_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
    };
    emit(&rendered, None)
}

fn render_compare_text(result: &ComparisonResult) -> String {
    let mut out = String::new();
    for pair in &result.common {
        if pair.params_differ {
            out.push_str(&format!(
                "  {YELLOW}~{RESET} {} -> {} (parameter names differ)\n",
                pair.a.identity_key, pair.b.identity_key
            ));
        }
    }
    for fact in &result.only_in_a {
        out.push_str(&format!("  {RED}-{RESET} {} ({})\n", fact.identity_key, fact.location));
    }
    for fact in &result.only_in_b {
        out.push_str(&format!("  {GREEN}+{RESET} {} ({})\n", fact.identity_key, fact.location));
    }

    let (common, only_a, only_b) = result.counts();
    let color = if result.has_drift() { YELLOW } else { GREEN };
    out.push_str(&format!(
        "{color}{common} matched, {only_a} only in old, {only_b} only in new{RESET}\n"
    ));
    out
}

/// Prints a rewrite report. `written` is how many files went to disk.
pub fn print_rewrite(
    report: &RewriteReport,
    written: usize,
    write: bool,
    format: OutputFormat,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_rewrite_text(report, written, write),
        OutputFormat::Json => {
            let changed: Vec<&Path> = report
                .files
                .iter()
                .filter(|f| f.changed)
                .map(|f| f.path.as_path())
                .collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "changed_files": changed,
                "diagnostics": report.diagnostics,
                "files_processed": report.files_processed,
                "written": written,
            }))?
        }
    };
    emit(&rendered, None)
}

fn render_rewrite_text(report: &RewriteReport, written: usize, write: bool) -> String {
    let mut out = String::new();
    let mut changed = 0;
    for file in &report.files {
        if file.changed {
            changed += 1;
            out.push_str(&format!("  rewrote {}\n", file.path.display()));
        }
    }
    push_diagnostics(&mut out, &report.diagnostics);
    let action = if write {
        format!("{written} written")
    } else {
        "dry run".to_owned()
    };
    out.push_str(&format!(
        "{GREEN}{changed} of {} file(s) changed ({action}){RESET}\n",
        report.files_processed
    ));
    out
}

fn push_diagnostics(out: &mut String, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    out.push_str("diagnostics\n");
    for diag in diagnostics {
        out.push_str(&format!("  {YELLOW}{diag}{RESET}\n"));
    }
    out.push('\n');
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }
    Ok(())
}
