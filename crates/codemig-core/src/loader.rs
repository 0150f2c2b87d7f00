//! Tree loading: turns file text into a syntax tree plus dialect metadata.

use std::path::{Path, PathBuf};

use tree_sitter::{Parser, Tree};
use tracing::debug;

use crate::types::Diagnostic;

/// Syntax dialect flags for a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Component-tree (JSX) syntax may be present.
    pub jsx: bool,
    /// TypeScript syntax may be present.
    pub typescript: bool,
}

/// A loaded source file: path, text, parsed tree, and dialect flags.
///
/// Owned by the run coordinator for its lifetime; immutable after load.
#[derive(Debug)]
pub struct SourceUnit {
    /// Path relative to the run root.
    pub path: PathBuf,
    /// Raw file contents.
    pub text: String,
    /// Parsed syntax tree.
    pub tree: Tree,
    /// Dialect flags derived from the file extension.
    pub dialect: Dialect,
}

impl SourceUnit {
    /// Returns the text of a node in this unit.
    #[must_use]
    pub fn node_text(&self, node: tree_sitter::Node<'_>) -> &str {
        self.text.get(node.start_byte()..node.end_byte()).unwrap_or("")
    }
}

/// Picks the dialect for a path based on its extension.
#[must_use]
pub fn dialect_for(path: &Path) -> Dialect {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    Dialect {
        jsx: matches!(ext, "js" | "jsx" | "tsx"),
        typescript: matches!(ext, "ts" | "tsx"),
    }
}

/// Parses file text into a [`SourceUnit`].
///
/// Pure function of the file contents. Failures are reported as
/// [`Diagnostic`]s rather than process-fatal errors:
///
/// - files larger than `max_bytes` are skipped (`too-large`) to bound
///   worst-case latency;
/// - unparseable files yield a `ParseFailure` naming the first bad line.
///
/// # Errors
///
/// Returns the diagnostic describing why the file was not loaded.
pub fn load_source(
    path: &Path,
    text: String,
    max_bytes: usize,
) -> Result<SourceUnit, Diagnostic> {
    if text.len() > max_bytes {
        debug!("skipping {} ({} bytes)", path.display(), text.len());
        return Err(Diagnostic::skipped(path, "too-large"));
    }

    let dialect = dialect_for(path);
    let language: tree_sitter::Language = if dialect.jsx {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    };

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Diagnostic::parse_failure(path, format!("grammar load failed: {e}")))?;

    let tree = parser
        .parse(text.as_bytes(), None)
        .ok_or_else(|| Diagnostic::parse_failure(path, "parser produced no tree"))?;

    if tree.root_node().has_error() {
        let line = first_error_line(tree.root_node());
        return Err(Diagnostic::parse_failure(
            path,
            format!("syntax error near line {line}"),
        ));
    }

    Ok(SourceUnit {
        path: path.to_path_buf(),
        text,
        tree,
        dialect,
    })
}

/// Finds the 1-indexed line of the first ERROR or MISSING node.
fn first_error_line(root: tree_sitter::Node<'_>) -> usize {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return node.start_position().row + 1;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return root.start_position().row + 1;
            }
        }
    }
}
