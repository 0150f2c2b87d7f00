//! Import statement collection, shared with the rewriter.

use codemig_core::SourceUnit;
use tree_sitter::Node;

use crate::util::string_value;

/// One `import` statement at the top level of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Module specifier, quotes stripped (e.g. `"@mui/material"`).
    pub source: String,
    /// Default import binding, when present.
    pub default_name: Option<String>,
    /// Named import bindings, local names (the alias for `x as y`).
    pub named: Vec<String>,
    /// Byte span of the whole statement.
    pub span: (usize, usize),
    /// 1-based line of the statement.
    pub line: usize,
}

impl ImportRecord {
    /// Whether the record binds the given local name.
    #[must_use]
    pub fn binds(&self, name: &str) -> bool {
        self.default_name.as_deref() == Some(name) || self.named.iter().any(|n| n == name)
    }
}

/// Collects the top-level `import` statements of a unit, in source order.
#[must_use]
pub fn collect_imports(unit: &SourceUnit) -> Vec<ImportRecord> {
    let root = unit.tree.root_node();
    let mut out = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() != "import_statement" {
            continue;
        }
        if let Some(record) = import_record(child, unit) {
            out.push(record);
        }
    }
    out
}

fn import_record(stmt: Node<'_>, unit: &SourceUnit) -> Option<ImportRecord> {
    let source_node = stmt.child_by_field_name("source")?;
    let source = string_value(source_node, unit)?;

    let mut default_name = None;
    let mut named = Vec::new();

    let mut cursor = stmt.walk();
    for part in stmt.named_children(&mut cursor) {
        if part.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = part.walk();
        for binding in part.named_children(&mut clause_cursor) {
            match binding.kind() {
                "identifier" => default_name = Some(unit.node_text(binding).to_owned()),
                "named_imports" => {
                    let mut spec_cursor = binding.walk();
                    for spec in binding.named_children(&mut spec_cursor) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        // `x as y` binds y locally.
                        let local = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(local) = local {
                            named.push(unit.node_text(local).to_owned());
                        }
                    }
                }
                "namespace_import" => {
                    if let Some(local) = namespace_local(binding, unit) {
                        default_name = Some(local);
                    }
                }
                _ => {}
            }
        }
    }

    Some(ImportRecord {
        source,
        default_name,
        named,
        span: (stmt.start_byte(), stmt.end_byte()),
        line: stmt.start_position().row + 1,
    })
}

fn namespace_local(binding: Node<'_>, unit: &SourceUnit) -> Option<String> {
    let mut cursor = binding.walk();
    let mut children = binding.named_children(&mut cursor);
    children
        .find(|c| c.kind() == "identifier")
        .map(|c| unit.node_text(c).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemig_core::load_source;
    use std::path::Path;

    fn imports(src: &str) -> Vec<ImportRecord> {
        let unit = load_source(Path::new("t.jsx"), src.into(), 1 << 20).expect("parse");
        collect_imports(&unit)
    }

    #[test]
    fn default_and_named_collected() {
        let recs = imports("import React, { useState, useEffect } from 'react';\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].source, "react");
        assert_eq!(recs[0].default_name.as_deref(), Some("React"));
        assert_eq!(recs[0].named, vec!["useState", "useEffect"]);
    }

    #[test]
    fn alias_binds_local_name() {
        let recs = imports("import { Button as MuiButton } from '@mui/material';\n");
        assert_eq!(recs[0].named, vec!["MuiButton"]);
        assert!(recs[0].binds("MuiButton"));
        assert!(!recs[0].binds("Button"));
    }

    #[test]
    fn namespace_import_binds_local_name() {
        let recs = imports("import * as api from './api';\n");
        assert_eq!(recs[0].source, "./api");
        assert!(recs[0].binds("api"));
    }

    #[test]
    fn side_effect_import_has_no_bindings() {
        let recs = imports("import './styles.css';\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].source, "./styles.css");
        assert!(recs[0].default_name.is_none());
        assert!(recs[0].named.is_empty());
    }

    #[test]
    fn statements_in_source_order_with_lines() {
        let recs = imports("import a from 'a';\nimport b from 'b';\n");
        assert_eq!(recs[0].line, 1);
        assert_eq!(recs[1].line, 2);
        assert!(recs[0].span.1 <= recs[1].span.0);
    }
}
