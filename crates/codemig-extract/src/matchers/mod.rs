//! Built-in matchers for the seven fact kinds.
//!
//! Registry order is priority order: specific shapes first, generic
//! fallbacks last.

mod api_call;
mod component;
mod redux;
mod routes;
mod state;

use codemig_core::{canonicalize, Fact, FactKind};
use tree_sitter::Node;

use crate::matcher::{MatchContext, MatcherBox};
use crate::util::location;

pub(crate) use api_call::{ApiLiteralMatcher, ClientCallMatcher, FetchCallMatcher};
pub(crate) use component::ComponentUsageMatcher;
pub(crate) use redux::{ActionMatcher, SliceMatcher};
pub(crate) use routes::{ExpressRouteMatcher, JsxRouteMatcher};
pub(crate) use state::{ContextMatcher, HookMatcher};

/// The default registry, in priority order.
pub(crate) fn default_registry() -> Vec<MatcherBox> {
    vec![
        Box::new(ExpressRouteMatcher),
        Box::new(JsxRouteMatcher),
        Box::new(ClientCallMatcher),
        Box::new(FetchCallMatcher),
        Box::new(ApiLiteralMatcher),
        Box::new(SliceMatcher),
        Box::new(ActionMatcher),
        Box::new(ContextMatcher),
        Box::new(HookMatcher),
        Box::new(ComponentUsageMatcher),
    ]
}

/// Builds a path-keyed fact, canonicalizing the raw path and recording an
/// `Unresolved` diagnostic when a dynamic piece is present.
pub(crate) fn path_fact(
    kind: FactKind,
    key_prefix: &str,
    method: &str,
    raw_path: &str,
    dynamic: bool,
    node: Node<'_>,
    cx: &mut MatchContext<'_>,
) -> Fact {
    let canon = canonicalize(raw_path, &cx.options.base_url_prefixes);
    let loc = location(cx.unit, node);
    if dynamic || canon.has_dynamic() {
        cx.note_unresolved(loc.clone(), "path segment");
    }
    Fact::new(kind, format!("{key_prefix}{method}:{}", canon.canonical), loc)
        .with_attr("method", method)
        .with_attr("path", canon.canonical.clone())
        .with_pattern(
            format!("{key_prefix}{method}:{}", canon.pattern),
            canon.params,
        )
        .with_node_span(node.start_byte(), node.end_byte())
}
