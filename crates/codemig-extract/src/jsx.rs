//! JSX element node helpers, shared by the extractor and the rewriter.

use codemig_core::SourceUnit;
use tree_sitter::Node;

use crate::util::string_value;

/// Whether the node is a JSX opening or self-closing element.
#[must_use]
pub fn is_element(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "jsx_opening_element" | "jsx_self_closing_element"
    )
}

/// The element's tag node (`identifier` or `member_expression`).
#[must_use]
pub fn tag_node<'t>(element: Node<'t>) -> Option<Node<'t>> {
    if let Some(name) = element.child_by_field_name("name") {
        return Some(name);
    }
    // Older grammars expose the name as the first named child.
    let mut cursor = element.walk();
    let mut children = element.named_children(&mut cursor);
    children.find(|c| {
        matches!(
            c.kind(),
            "identifier" | "member_expression" | "nested_identifier" | "jsx_identifier"
        )
    })
}

/// The element's tag text (e.g. `"Button"`, `"Cart.Provider"`).
#[must_use]
pub fn tag_name(element: Node<'_>, unit: &SourceUnit) -> Option<String> {
    tag_node(element).map(|n| unit.node_text(n).to_owned())
}

/// One attribute on a JSX element.
#[derive(Debug, Clone)]
pub struct AttrNode<'t> {
    /// Attribute name.
    pub name: String,
    /// Value node (`string` or `jsx_expression`), `None` for bare attributes.
    pub value: Option<Node<'t>>,
    /// The `jsx_attribute` node itself.
    pub node: Node<'t>,
}

/// Collects the attributes of a JSX opening or self-closing element.
#[must_use]
pub fn attributes<'t>(element: Node<'t>, unit: &SourceUnit) -> Vec<AttrNode<'t>> {
    let mut out = Vec::new();
    let mut cursor = element.walk();
    for child in element.named_children(&mut cursor) {
        if child.kind() != "jsx_attribute" {
            continue;
        }
        let Some(name_node) = child.named_child(0) else {
            continue;
        };
        out.push(AttrNode {
            name: unit.node_text(name_node).to_owned(),
            value: child.named_child(1),
            node: child,
        });
    }
    out
}

/// The static string value of a named attribute, when it has one.
///
/// Outer `None` means the attribute is absent; inner `None` means it is
/// present but not a static string (bare or an expression).
#[must_use]
pub fn attribute_string(
    element: Node<'_>,
    unit: &SourceUnit,
    name: &str,
) -> Option<Option<String>> {
    attributes(element, unit)
        .into_iter()
        .find(|a| a.name == name)
        .map(|a| a.value.and_then(|v| string_value(v, unit)))
}

/// The unquoted value of a `string` attribute value node.
#[must_use]
pub fn string_text(value: Node<'_>, unit: &SourceUnit) -> Option<String> {
    string_value(value, unit)
}

/// The raw text inside a `jsx_expression` value (braces stripped).
#[must_use]
pub fn expression_text<'u>(value: Node<'_>, unit: &'u SourceUnit) -> Option<&'u str> {
    if value.kind() != "jsx_expression" {
        return None;
    }
    value.named_child(0).map(|e| unit.node_text(e))
}
