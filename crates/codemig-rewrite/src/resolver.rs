//! Rule resolution: one element plus a rule table in, one plan out.

use codemig_core::Location;

use crate::rules::{MappingRule, PropRule, RuleTable};

/// The value side of one JSX attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Bare attribute (`disabled`).
    Bare,
    /// Static string value (`variant="contained"`).
    Str(String),
    /// Expression value, kept verbatim (`onClick={go}` stores `go`).
    Expr(String),
}

/// One attribute of an element model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxAttr {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: AttrValue,
}

impl JsxAttr {
    /// Renders the attribute as source text.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.value {
            AttrValue::Bare => self.name.clone(),
            AttrValue::Str(v) => format!("{}=\"{v}\"", self.name),
            AttrValue::Expr(e) => format!("{}={{{e}}}", self.name),
        }
    }
}

/// A source element lifted out of the tree for resolution.
#[derive(Debug, Clone)]
pub struct ElementModel {
    /// Tag name (simple identifiers only).
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<JsxAttr>,
    /// Where the element starts.
    pub location: Location,
    /// Byte span of the opening (or self-closing) element.
    pub span: (usize, usize),
    /// Byte span of the matching closing tag, when the element has one.
    pub closing_span: Option<(usize, usize)>,
    /// Whether the element is self-closing.
    pub self_closing: bool,
}

/// The resolved, ready-to-emit rewrite for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformPlan {
    /// Tag to emit.
    pub target_tag: String,
    /// Attributes carried over, in source order, class attribute excluded.
    pub attributes: Vec<JsxAttr>,
    /// Composed class string; empty when nothing contributes.
    pub class_name: String,
    /// Boolean props whose value is a runtime expression. They are kept on
    /// the element verbatim (their classes cannot be applied statically) and
    /// reported as `Unresolved`.
    pub unresolved_props: Vec<String>,
}

/// The outcome of resolving one element against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A plan was produced; the element is rewritten.
    Rewrite(TransformPlan),
    /// The element cannot be mechanically rewritten; leave it alone and
    /// report the reason.
    ManualReview(String),
    /// No rule covers the tag; the element is left untouched.
    NoRule,
}

/// The statically-known truth of a prop attribute, when it has one. Bare
/// attributes and string values are known; of expression values only the
/// `true`/`false` literals are.
fn boolean_state(value: &AttrValue) -> Option<bool> {
    match value {
        AttrValue::Bare => Some(true),
        AttrValue::Str(v) => Some(v != "false"),
        AttrValue::Expr(e) => match e.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
    }
}

fn str_value(value: &AttrValue) -> Option<&str> {
    match value {
        AttrValue::Str(v) => Some(v),
        AttrValue::Bare | AttrValue::Expr(_) => None,
    }
}

/// Looks up the enum-table classes for one of the dedicated dimension
/// attributes (`variant`, `color`, `size`). Unrecognized values add nothing.
fn dimension_classes<'r>(
    table: &'r std::collections::HashMap<String, String>,
    attrs: &[JsxAttr],
    name: &str,
) -> Option<&'r str> {
    let attr = attrs.iter().find(|a| a.name == name)?;
    let value = str_value(&attr.value)?;
    table.get(value).map(String::as_str)
}

/// Resolves the target tag, honoring a `component` prop override.
fn target_tag(rule: &MappingRule, attrs: &[JsxAttr]) -> String {
    if let Some(PropRule::Values(overrides)) = rule.props.get("component") {
        if let Some(attr) = attrs.iter().find(|a| a.name == "component") {
            if let Some(value) = str_value(&attr.value) {
                if let Some(tag) = overrides.get(value) {
                    return tag.clone();
                }
            }
        }
    }
    rule.target_tag.clone()
}

/// Resolves one element against the table.
///
/// Class composition order is fixed: base classes, then variant, color and
/// size lookups, then the remaining prop rules in attribute order, then any
/// pre-existing class string from the source node. Later steps append and
/// never replace, so the composed string can be inspected by diffing.
#[must_use]
pub fn resolve(element: &ElementModel, table: &RuleTable) -> Resolution {
    let Some(rule) = table.rule_for(&element.tag) else {
        return Resolution::NoRule;
    };
    if rule.custom_implementation {
        return Resolution::ManualReview("needs a custom implementation".to_owned());
    }
    // An expression-valued class attribute cannot be merged into the
    // composed string without losing it; hand the element over instead.
    if let Some(attr) = element.attrs.iter().find(|a| a.name == table.class_attr) {
        if matches!(attr.value, AttrValue::Expr(_)) {
            return Resolution::ManualReview(format!(
                "carries an expression-valued `{}`",
                table.class_attr
            ));
        }
    }

    let mut classes: Vec<String> = Vec::new();
    if !rule.base_classes.is_empty() {
        classes.push(rule.base_classes.clone());
    }
    for (dim_table, name) in [
        (&rule.variants, "variant"),
        (&rule.colors, "color"),
        (&rule.sizes, "size"),
    ] {
        if let Some(c) = dimension_classes(dim_table, &element.attrs, name) {
            classes.push(c.to_owned());
        }
    }

    let mut attributes = Vec::new();
    let mut unresolved_props = Vec::new();
    for attr in &element.attrs {
        // The dimension and component props are consumed by the rule; they
        // mean nothing on the target element.
        if matches!(attr.name.as_str(), "variant" | "color" | "size" | "component") {
            continue;
        }
        if attr.name == table.class_attr {
            continue; // re-emitted last, after the computed classes
        }
        match rule.props.get(&attr.name) {
            Some(PropRule::Classes(c)) => match boolean_state(&attr.value) {
                Some(true) => classes.push(c.clone()),
                Some(false) => {}
                None => {
                    // Runtime-conditional prop: keep it on the element and
                    // flag it for the caller.
                    unresolved_props.push(attr.name.clone());
                    attributes.push(attr.clone());
                }
            },
            Some(PropRule::Values(values)) => {
                if let Some(c) = str_value(&attr.value).and_then(|v| values.get(v)) {
                    classes.push(c.clone());
                }
            }
            None => attributes.push(attr.clone()),
        }
    }

    // Source class string last, so author overrides stay visible.
    if let Some(attr) = element.attrs.iter().find(|a| a.name == table.class_attr) {
        if let Some(existing) = str_value(&attr.value) {
            if !existing.is_empty() {
                classes.push(existing.to_owned());
            }
        }
    }

    Resolution::Rewrite(TransformPlan {
        target_tag: target_tag(rule, &element.attrs),
        attributes,
        class_name: classes.join(" "),
        unresolved_props,
    })
}
