//! Span-edit rewriting of one source unit.

use std::collections::HashSet;

use codemig_core::{Diagnostic, Location, SourceUnit};
use codemig_extract::{collect_imports, jsx};
use tracing::debug;
use tree_sitter::Node;

use crate::resolver::{resolve, AttrValue, ElementModel, JsxAttr, Resolution, TransformPlan};
use crate::rules::RuleTable;

/// The result of rewriting one unit.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    /// The regenerated source text; equal to the input when nothing applied.
    pub new_text: String,
    /// Whether any edit was applied.
    pub changed: bool,
    /// Manual-review findings for this unit.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of elements rewritten.
    pub plans_applied: usize,
}

/// One byte-range replacement, applied in descending start order.
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

struct PlannedRewrite {
    model: ElementModel,
    plan: TransformPlan,
}

/// Rewrites every element of the unit the table covers and adjusts the
/// unit's import list. Returns new text; never touches disk.
#[must_use]
pub fn rewrite_unit(unit: &SourceUnit, table: &RuleTable) -> RewriteOutcome {
    let mut diagnostics = Vec::new();
    let mut remaining: HashSet<String> = HashSet::new();
    let mut rewrites: Vec<PlannedRewrite> = Vec::new();

    for model in collect_elements(unit) {
        match resolve(&model, table) {
            Resolution::Rewrite(plan) => {
                for prop in &plan.unresolved_props {
                    diagnostics.push(Diagnostic::unresolved(
                        model.location.clone(),
                        format!(
                            "`{prop}` on `{}` is a runtime expression; its classes were not applied",
                            model.tag
                        ),
                    ));
                }
                rewrites.push(PlannedRewrite { model, plan });
            }
            Resolution::ManualReview(reason) => {
                diagnostics.push(Diagnostic::manual_review(
                    model.location.clone(),
                    format!("`{}` {reason}", model.tag),
                ));
                remaining.insert(model.tag);
            }
            Resolution::NoRule => {
                remaining.insert(model.tag);
            }
        }
    }

    // An element sitting inside another rewritten element's opening tag
    // (JSX in an attribute expression) would be clobbered by regenerating
    // the outer opening text; leave it to a human.
    let mut accepted: Vec<PlannedRewrite> = Vec::new();
    'next: for rw in rewrites {
        for outer in &accepted {
            let (start, end) = outer.model.span;
            if rw.model.span.0 > start && rw.model.span.1 <= end {
                diagnostics.push(Diagnostic::manual_review(
                    rw.model.location.clone(),
                    format!(
                        "`{}` sits inside a rewritten attribute expression",
                        rw.model.tag
                    ),
                ));
                remaining.insert(rw.model.tag.clone());
                continue 'next;
            }
        }
        accepted.push(rw);
    }

    let plans_applied = accepted.len();
    let mut edits: Vec<Edit> = Vec::with_capacity(plans_applied * 2);
    for rw in &accepted {
        edits.push(Edit {
            start: rw.model.span.0,
            end: rw.model.span.1,
            text: render_opening(&rw.plan, &table.class_attr, rw.model.self_closing),
        });
        if let Some((start, end)) = rw.model.closing_span {
            edits.push(Edit {
                start,
                end,
                text: format!("</{}>", rw.plan.target_tag),
            });
        }
    }

    if plans_applied > 0 {
        import_edits(unit, table, &remaining, &mut edits);
    }

    let changed = !edits.is_empty();
    let new_text = apply_edits(&unit.text, edits);
    debug!(
        path = %unit.path.display(),
        plans_applied,
        changed,
        "rewrite finished"
    );

    RewriteOutcome {
        new_text,
        changed,
        diagnostics,
        plans_applied,
    }
}

fn render_opening(plan: &TransformPlan, class_attr: &str, self_closing: bool) -> String {
    let mut out = String::from("<");
    out.push_str(&plan.target_tag);
    for attr in &plan.attributes {
        out.push(' ');
        out.push_str(&attr.render());
    }
    if !plan.class_name.is_empty() {
        out.push(' ');
        out.push_str(class_attr);
        out.push_str("=\"");
        out.push_str(&plan.class_name);
        out.push('"');
    }
    out.push_str(if self_closing { " />" } else { ">" });
    out
}

/// Removes the source widget-library import when no element still needs any
/// of its bindings, and inserts the configured target imports after the last
/// import statement.
fn import_edits(
    unit: &SourceUnit,
    table: &RuleTable,
    remaining: &HashSet<String>,
    edits: &mut Vec<Edit>,
) {
    let imports = collect_imports(unit);

    for import in imports.iter().filter(|i| i.source == table.source_module) {
        let still_needed = import
            .named
            .iter()
            .chain(import.default_name.as_ref())
            .any(|name| remaining.contains(name));
        if still_needed {
            continue;
        }
        // Take the trailing newline with the statement.
        let mut end = import.span.1;
        if unit.text.as_bytes().get(end) == Some(&b'\n') {
            end += 1;
        }
        edits.push(Edit {
            start: import.span.0,
            end,
            text: String::new(),
        });
    }

    let additions: Vec<&String> = table
        .add_imports
        .iter()
        .filter(|line| !unit.text.contains(line.trim()))
        .collect();
    if additions.is_empty() {
        return;
    }
    let mut text = String::new();
    for line in additions {
        text.push('\n');
        text.push_str(line);
    }
    let at = imports.last().map_or(0, |i| i.span.1);
    if at == 0 {
        // No imports to anchor on: put them first instead.
        text = text.split_off(1) + "\n";
    }
    edits.push(Edit {
        start: at,
        end: at,
        text,
    });
}

fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    let mut out = text.to_owned();
    for edit in edits {
        out.replace_range(edit.start..edit.end, &edit.text);
    }
    out
}

/// Lifts every simple-identifier JSX element into an [`ElementModel`],
/// in pre-order.
fn collect_elements(unit: &SourceUnit) -> Vec<ElementModel> {
    let mut out = Vec::new();
    let mut stack = vec![unit.tree.root_node()];
    let mut ordered = Vec::new();
    while let Some(node) = stack.pop() {
        ordered.push(node);
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    for node in ordered {
        match node.kind() {
            "jsx_self_closing_element" => {
                if let Some(model) = element_model(node, None, unit) {
                    out.push(model);
                }
            }
            "jsx_element" => {
                let opening = first_child_of_kind(node, "jsx_opening_element");
                let closing = first_child_of_kind(node, "jsx_closing_element");
                if let Some(opening) = opening {
                    if let Some(model) = element_model(opening, closing, unit) {
                        out.push(model);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let mut children = node.named_children(&mut cursor);
    children.find(|c| c.kind() == kind)
}

fn element_model(
    element: Node<'_>,
    closing: Option<Node<'_>>,
    unit: &SourceUnit,
) -> Option<ElementModel> {
    let tag_node = jsx::tag_node(element)?;
    if !matches!(tag_node.kind(), "identifier" | "jsx_identifier") {
        return None;
    }
    let tag = unit.node_text(tag_node).to_owned();

    let attrs = jsx::attributes(element, unit)
        .into_iter()
        .map(|a| JsxAttr {
            name: a.name,
            value: match a.value {
                None => AttrValue::Bare,
                Some(v) if v.kind() == "string" => {
                    AttrValue::Str(jsx::string_text(v, unit).unwrap_or_default())
                }
                Some(v) => {
                    AttrValue::Expr(jsx::expression_text(v, unit).unwrap_or_default().to_owned())
                }
            },
        })
        .collect();

    let pos = element.start_position();
    Some(ElementModel {
        tag,
        attrs,
        location: Location::new(unit.path.clone(), pos.row + 1, pos.column + 1)
            .with_span(element.start_byte(), element.end_byte() - element.start_byte()),
        span: (element.start_byte(), element.end_byte()),
        closing_span: closing.map(|c| (c.start_byte(), c.end_byte())),
        self_closing: element.kind() == "jsx_self_closing_element",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemig_core::{load_source, DiagnosticKind};
    use std::path::Path;

    fn table() -> RuleTable {
        RuleTable::parse(
            r#"
source_module = "@mui/material"
add_imports = []

[[rules]]
source_tag = "Button"
target_tag = "button"
base_classes = "px-4 py-2 rounded"

[rules.variants]
contained = "shadow"

[rules.colors]
primary = "bg-blue-500 text-white"

[rules.props]
disabled = "opacity-50 cursor-not-allowed"

[[rules]]
source_tag = "Autocomplete"
target_tag = "input"
custom_implementation = true
"#,
        )
        .expect("table parses")
    }

    fn rewrite(src: &str) -> RewriteOutcome {
        let unit = load_source(Path::new("t.jsx"), src.into(), 1 << 20).expect("parse");
        rewrite_unit(&unit, &table())
    }

    #[test]
    fn self_closing_element_rewritten() {
        let out = rewrite("const x = <Button variant=\"contained\" color=\"primary\" disabled />;\n");
        assert!(out.changed);
        assert_eq!(out.plans_applied, 1);
        assert_eq!(
            out.new_text,
            "const x = <button className=\"px-4 py-2 rounded shadow bg-blue-500 text-white opacity-50 cursor-not-allowed\" />;\n"
        );
    }

    #[test]
    fn closing_tag_renamed() {
        let out = rewrite("const x = <Button variant=\"contained\">Buy</Button>;\n");
        assert_eq!(
            out.new_text,
            "const x = <button className=\"px-4 py-2 rounded shadow\">Buy</button>;\n"
        );
    }

    #[test]
    fn unmapped_attributes_survive() {
        let out = rewrite("const x = <Button onClick={go} data-test=\"buy\" />;\n");
        assert_eq!(
            out.new_text,
            "const x = <button onClick={go} data-test=\"buy\" className=\"px-4 py-2 rounded\" />;\n"
        );
    }

    #[test]
    fn uncovered_tag_left_alone() {
        let src = "const x = <Card title=\"hi\" />;\n";
        let out = rewrite(src);
        assert!(!out.changed);
        assert_eq!(out.new_text, src);
        assert_eq!(out.plans_applied, 0);
    }

    #[test]
    fn custom_implementation_reports_and_preserves() {
        let src = "const x = <Autocomplete options={opts} />;\n";
        let out = rewrite(src);
        assert!(!out.changed);
        assert_eq!(out.new_text, src);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::ManualReview);
    }

    #[test]
    fn expression_class_attribute_preserved_and_reported() {
        let src = "const x = <Button className={styles.buy} />;\n";
        let out = rewrite(src);
        assert!(!out.changed);
        assert_eq!(out.new_text, src);
        assert_eq!(out.plans_applied, 0);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::ManualReview);
    }

    #[test]
    fn runtime_boolean_prop_survives_with_diagnostic() {
        let out = rewrite("const x = <Button disabled={isDisabled} />;\n");
        assert_eq!(
            out.new_text,
            "const x = <button disabled={isDisabled} className=\"px-4 py-2 rounded\" />;\n"
        );
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Unresolved));
    }

    #[test]
    fn source_import_removed_when_unused() {
        let src = "import { Button } from '@mui/material';\nconst x = <Button />;\n";
        let out = rewrite(src);
        assert_eq!(
            out.new_text,
            "const x = <button className=\"px-4 py-2 rounded\" />;\n"
        );
    }

    #[test]
    fn source_import_kept_while_a_binding_is_still_needed() {
        let src =
            "import { Button, Autocomplete } from '@mui/material';\nconst x = <Autocomplete />;\nconst y = <Button />;\n";
        let out = rewrite(src);
        assert!(out.new_text.contains("from '@mui/material'"));
        assert!(out.new_text.contains("<button"));
    }

    #[test]
    fn target_imports_added_after_last_import() {
        let mut t = table();
        t.add_imports = vec!["import './tailwind.css';".to_owned()];
        let src = "import React from 'react';\nconst x = <Button />;\n";
        let unit = load_source(Path::new("t.jsx"), src.into(), 1 << 20).expect("parse");
        let out = rewrite_unit(&unit, &t);
        assert!(out
            .new_text
            .starts_with("import React from 'react';\nimport './tailwind.css';\n"));
    }

    #[test]
    fn target_imports_not_duplicated() {
        let mut t = table();
        t.add_imports = vec!["import './tailwind.css';".to_owned()];
        let src = "import './tailwind.css';\nconst x = <Button />;\n";
        let unit = load_source(Path::new("t.jsx"), src.into(), 1 << 20).expect("parse");
        let out = rewrite_unit(&unit, &t);
        assert_eq!(out.new_text.matches("tailwind.css").count(), 1);
    }

    #[test]
    fn element_in_attribute_expression_deferred() {
        let src = "const x = <Button icon={<Button size=\"small\" />} />;\n";
        let out = rewrite(src);
        assert_eq!(out.plans_applied, 1);
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::ManualReview));
        // The inner element's original text is preserved inside the
        // carried-over attribute expression.
        assert!(out.new_text.contains("<Button size=\"small\" />"));
    }

    #[test]
    fn rewriting_twice_is_idempotent() {
        let src = "import { Button } from '@mui/material';\nconst x = <Button variant=\"contained\">Buy</Button>;\n";
        let first = rewrite(src);
        assert!(first.changed);
        let unit =
            load_source(Path::new("t.jsx"), first.new_text.clone(), 1 << 20).expect("parse");
        let second = rewrite_unit(&unit, &table());
        assert!(!second.changed);
        assert_eq!(second.new_text, first.new_text);
    }

    #[test]
    fn nested_children_each_rewritten() {
        let out = rewrite("const x = <Button><Button size=\"small\" /></Button>;\n");
        // Children are siblings of the opening tag's span, not inside it.
        assert_eq!(out.plans_applied, 2);
        assert_eq!(
            out.new_text,
            "const x = <button className=\"px-4 py-2 rounded\"><button className=\"px-4 py-2 rounded\" /></button>;\n"
        );
    }
}
