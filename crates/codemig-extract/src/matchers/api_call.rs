//! API call matchers: named clients, `fetch`, and the literal fallback.

use codemig_core::{Fact, FactKind};
use tree_sitter::Node;

use crate::matcher::{MatchContext, Matcher};
use crate::util::{object_string_property, path_argument, string_value, HTTP_METHODS};

use super::path_fact;

/// The object name a call like `api.get(...)` hangs off, if simple enough
/// to resolve statically.
fn callee_object_name<'u>(func: Node<'_>, cx: &MatchContext<'u>) -> Option<&'u str> {
    let object = func.child_by_field_name("object")?;
    match object.kind() {
        "identifier" => Some(cx.unit.node_text(object)),
        // this.api.get(...) — use the innermost property name.
        "member_expression" => object
            .child_by_field_name("property")
            .map(|p| cx.unit.node_text(p)),
        _ => None,
    }
}

/// `axios.get('/x')` and friends on recognized client objects.
pub(crate) struct ClientCallMatcher;

impl Matcher for ClientCallMatcher {
    fn name(&self) -> &'static str {
        "client-call"
    }

    fn kind(&self) -> FactKind {
        FactKind::ApiCall
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let func = node.child_by_field_name("function")?;
        if func.kind() != "member_expression" {
            return None;
        }
        let prop = func.child_by_field_name("property")?;
        let verb = cx.unit.node_text(prop);
        if !HTTP_METHODS.contains(&verb) {
            return None;
        }
        let object = callee_object_name(func, cx)?.to_owned();
        if !cx.options.client_objects.iter().any(|c| *c == object) {
            return None;
        }

        let args = node.child_by_field_name("arguments")?;
        let (raw, dynamic, literal) =
            path_argument(args, cx.unit, &cx.options.base_url_idents)?;
        if let Some(lit) = literal {
            cx.consume(lit);
        }

        let method = verb.to_uppercase();
        Some(path_fact(self.kind(), "", &method, &raw, dynamic, node, cx).with_attr("client", object))
    }
}

/// `fetch(url, { method })` calls.
pub(crate) struct FetchCallMatcher;

impl Matcher for FetchCallMatcher {
    fn name(&self) -> &'static str {
        "fetch-call"
    }

    fn kind(&self) -> FactKind {
        FactKind::ApiCall
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let func = node.child_by_field_name("function")?;
        if func.kind() != "identifier" || cx.unit.node_text(func) != "fetch" {
            return None;
        }

        let args = node.child_by_field_name("arguments")?;
        let (raw, dynamic, literal) =
            path_argument(args, cx.unit, &cx.options.base_url_idents)?;
        if let Some(lit) = literal {
            cx.consume(lit);
        }

        // Method from the init object's `method` property; GET when absent.
        let method = match args.named_child(1) {
            Some(init) if init.kind() == "object" => {
                match object_string_property(init, cx.unit, "method") {
                    Some(Some(m)) => m.to_uppercase(),
                    Some(None) => "<dynamic>".to_owned(),
                    None => "GET".to_owned(),
                }
            }
            _ => "GET".to_owned(),
        };

        let fact = path_fact(self.kind(), "", &method, &raw, dynamic, node, cx)
            .with_attr("client", "fetch");
        Some(fact)
    }
}

/// Generic fallback: any string literal that looks like `/api/...`.
///
/// Lowest priority; skips literals already claimed by a specific matcher.
pub(crate) struct ApiLiteralMatcher;

impl Matcher for ApiLiteralMatcher {
    fn name(&self) -> &'static str {
        "api-literal"
    }

    fn kind(&self) -> FactKind {
        FactKind::ApiCall
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "string" || cx.is_consumed(node) {
            return None;
        }
        let value = string_value(node, cx.unit)?;
        if !value.starts_with("/api/") {
            return None;
        }
        Some(path_fact(self.kind(), "", "GET", &value, false, node, cx).with_attr("client", "literal"))
    }
}
