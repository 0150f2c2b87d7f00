//! Node helpers shared by the matchers.

use codemig_core::{Location, SourceUnit, DYNAMIC_TOKEN};
use tree_sitter::Node;

/// HTTP verbs recognized on client and route objects.
pub(crate) const HTTP_METHODS: &[&str] = &["get", "post", "put", "patch", "delete", "head"];

/// Builds a [`Location`] for a node within a unit.
pub(crate) fn location(unit: &SourceUnit, node: Node<'_>) -> Location {
    let pos = node.start_position();
    Location::new(unit.path.clone(), pos.row + 1, pos.column + 1)
        .with_span(node.start_byte(), node.end_byte() - node.start_byte())
}

/// Extracts the value of a `string` node (quotes stripped).
pub(crate) fn string_value(node: Node<'_>, unit: &SourceUnit) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let mut out = String::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if matches!(child.kind(), "string_fragment" | "escape_sequence") {
            out.push_str(unit.node_text(child));
        }
    }
    Some(out)
}

/// Flattens a `template_string` node to a path string.
///
/// Interpolations of a recognized base-URL identifier at the start of the
/// template are stripped; any other interpolation becomes the
/// [`DYNAMIC_TOKEN`] sentinel. Returns `(value, has_dynamic)`.
pub(crate) fn template_value(
    node: Node<'_>,
    unit: &SourceUnit,
    base_idents: &[String],
) -> Option<(String, bool)> {
    if node.kind() != "template_string" {
        return None;
    }
    let mut out = String::new();
    let mut dynamic = false;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "string_fragment" | "escape_sequence" => out.push_str(unit.node_text(child)),
            "template_substitution" => {
                let expr = child.named_child(0);
                let is_base = out.is_empty()
                    && expr.is_some_and(|e| {
                        e.kind() == "identifier"
                            && base_idents.iter().any(|i| i == unit.node_text(e))
                    });
                if !is_base {
                    out.push_str(DYNAMIC_TOKEN);
                    dynamic = true;
                }
            }
            _ => {}
        }
    }
    Some((out, dynamic))
}

/// Extracts a path-like first argument from a call's `arguments` node.
///
/// Returns the raw value, whether it contains a dynamic piece, and the
/// literal node to mark as consumed (so generic fallbacks skip it).
pub(crate) fn path_argument<'t>(
    args: Node<'t>,
    unit: &SourceUnit,
    base_idents: &[String],
) -> Option<(String, bool, Option<Node<'t>>)> {
    let first = args.named_child(0)?;
    match first.kind() {
        "string" => string_value(first, unit).map(|v| (v, false, Some(first))),
        "template_string" => {
            template_value(first, unit, base_idents).map(|(v, dyn_)| (v, dyn_, Some(first)))
        }
        _ => Some((DYNAMIC_TOKEN.to_owned(), true, None)),
    }
}

/// The name bound by the enclosing `variable_declarator`, if the node is
/// the declarator's value. Array destructuring yields the first element.
pub(crate) fn declarator_name(node: Node<'_>, unit: &SourceUnit) -> Option<String> {
    let parent = node.parent()?;
    if parent.kind() != "variable_declarator" {
        return None;
    }
    let name = parent.child_by_field_name("name")?;
    match name.kind() {
        "identifier" => Some(unit.node_text(name).to_owned()),
        "array_pattern" => {
            let mut cursor = name.walk();
            let mut children = name.named_children(&mut cursor);
            children
                .find(|c| c.kind() == "identifier")
                .map(|c| unit.node_text(c).to_owned())
        }
        _ => None,
    }
}

/// The name of the function or component the node sits inside, walking
/// ancestors until a named function or declarator is found.
pub(crate) fn enclosing_function(node: Node<'_>, unit: &SourceUnit) -> Option<String> {
    let mut current = node.parent();
    while let Some(n) = current {
        match n.kind() {
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = n.child_by_field_name("name") {
                    return Some(unit.node_text(name).to_owned());
                }
            }
            "variable_declarator" => {
                if let Some(name) = n.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        return Some(unit.node_text(name).to_owned());
                    }
                }
            }
            "method_definition" => {
                if let Some(name) = n.child_by_field_name("name") {
                    return Some(unit.node_text(name).to_owned());
                }
            }
            _ => {}
        }
        current = n.parent();
    }
    None
}

/// Finds the `pair` value for a property in an `object` node.
///
/// Outer `None` means the key is absent; inner `None` means the value is
/// present but not a static string.
pub(crate) fn object_string_property(
    object: Node<'_>,
    unit: &SourceUnit,
    key: &str,
) -> Option<Option<String>> {
    if object.kind() != "object" {
        return None;
    }
    let mut cursor = object.walk();
    for child in object.named_children(&mut cursor) {
        if child.kind() != "pair" {
            continue;
        }
        let Some(k) = child.child_by_field_name("key") else {
            continue;
        };
        let key_text = match k.kind() {
            "property_identifier" => unit.node_text(k).to_owned(),
            "string" => string_value(k, unit).unwrap_or_default(),
            _ => continue,
        };
        if key_text != key {
            continue;
        }
        let value = child.child_by_field_name("value");
        return Some(value.and_then(|v| string_value(v, unit)));
    }
    None
}
