//! Route definition matchers: Express-style registrars and `<Route>` JSX.

use codemig_core::{Fact, FactKind, DYNAMIC_TOKEN};
use tree_sitter::Node;

use crate::jsx;
use crate::matcher::{MatchContext, Matcher};
use crate::util::path_argument;

use super::path_fact;

/// Verbs accepted on route registrar objects.
const ROUTE_VERBS: &[&str] = &["get", "post", "put", "patch", "delete", "all"];

/// Synthetic method for page routes, which carry no HTTP verb.
const PAGE_METHOD: &str = "PAGE";

/// `app.get('/api/users', handler)` style route definitions.
pub(crate) struct ExpressRouteMatcher;

impl Matcher for ExpressRouteMatcher {
    fn name(&self) -> &'static str {
        "express-route"
    }

    fn kind(&self) -> FactKind {
        FactKind::RouteDef
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let func = node.child_by_field_name("function")?;
        if func.kind() != "member_expression" {
            return None;
        }
        let object = func.child_by_field_name("object")?;
        if object.kind() != "identifier" {
            return None;
        }
        let object_name = cx.unit.node_text(object);
        if !cx.options.route_objects.iter().any(|r| r == object_name) {
            return None;
        }
        let prop = func.child_by_field_name("property")?;
        let verb = cx.unit.node_text(prop);
        if !ROUTE_VERBS.contains(&verb) {
            return None;
        }

        let args = node.child_by_field_name("arguments")?;
        let (raw, dynamic, literal) =
            path_argument(args, cx.unit, &cx.options.base_url_idents)?;
        if let Some(lit) = literal {
            cx.consume(lit);
        }

        let method = verb.to_uppercase();
        Some(path_fact(self.kind(), "route:", &method, &raw, dynamic, node, cx))
    }
}

/// `<Route path="/products/:id" ... />` page route definitions.
pub(crate) struct JsxRouteMatcher;

impl Matcher for JsxRouteMatcher {
    fn name(&self) -> &'static str {
        "jsx-route"
    }

    fn kind(&self) -> FactKind {
        FactKind::RouteDef
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if !cx.unit.dialect.jsx || !jsx::is_element(node) {
            return None;
        }
        if jsx::tag_name(node, cx.unit).as_deref() != Some("Route") {
            return None;
        }

        // Index routes and layout routes have no path; nothing to record.
        let path_attr = jsx::attribute_string(node, cx.unit, "path")?;
        let (raw, dynamic) = match path_attr {
            Some(value) => (value, false),
            None => (DYNAMIC_TOKEN.to_owned(), true),
        };

        if let Some(attr) = jsx::attributes(node, cx.unit)
            .into_iter()
            .find(|a| a.name == "path")
        {
            if let Some(value) = attr.value {
                cx.consume(value);
            }
        }

        Some(path_fact(self.kind(), "route:", PAGE_METHOD, &raw, dynamic, node, cx))
    }
}
