//! The single-pass extraction walk.

use codemig_core::{Diagnostic, Fact, FactKind, SourceUnit};
use tracing::trace;

use crate::matcher::{MatchContext, MatcherBox};
use crate::matchers::default_registry;
use crate::options::ExtractOptions;

/// Walks a parsed unit once and runs the matcher registry on every node.
pub struct FactExtractor {
    matchers: Vec<MatcherBox>,
}

impl FactExtractor {
    /// An extractor with the built-in matcher registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matchers: default_registry(),
        }
    }

    /// Extracts facts and diagnostics from one unit.
    ///
    /// Facts come back in source order (pre-order over the tree). A node
    /// yields at most one fact per kind; the first matcher of a kind to
    /// match claims that kind for the node.
    #[must_use]
    pub fn extract(
        &self,
        unit: &SourceUnit,
        options: &ExtractOptions,
    ) -> (Vec<Fact>, Vec<Diagnostic>) {
        let mut cx = MatchContext::new(unit, options);
        let mut facts = Vec::new();
        let mut claimed: Vec<FactKind> = Vec::with_capacity(4);

        let mut cursor = unit.tree.walk();
        loop {
            let node = cursor.node();
            if node.is_named() {
                claimed.clear();
                for matcher in &self.matchers {
                    if claimed.contains(&matcher.kind()) {
                        continue;
                    }
                    if let Some(fact) = matcher.try_match(node, &mut cx) {
                        trace!(
                            matcher = matcher.name(),
                            key = %fact.identity_key,
                            line = fact.location.line,
                            "matched"
                        );
                        claimed.push(fact.kind);
                        facts.push(fact);
                    }
                }
            }

            // Pre-order traversal: down, then right, then up-and-right.
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return (facts, cx.diagnostics);
                }
            }
        }
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemig_core::load_source;
    use std::path::Path;

    fn extract(src: &str) -> (Vec<Fact>, Vec<Diagnostic>) {
        let unit = load_source(Path::new("t.jsx"), src.into(), 1 << 20).expect("parse");
        FactExtractor::new().extract(&unit, &ExtractOptions::default())
    }

    #[test]
    fn facts_come_back_in_source_order() {
        let src = "axios.get('/api/a');\naxios.get('/api/b');\nfetch('/api/c');\n";
        let (facts, _) = extract(src);
        let keys: Vec<&str> = facts.iter().map(|f| f.identity_key.as_str()).collect();
        assert_eq!(keys, vec!["GET:/api/a", "GET:/api/b", "GET:/api/c"]);
    }

    #[test]
    fn one_node_yields_at_most_one_fact_per_kind() {
        // Both the client matcher and the literal fallback target ApiCall;
        // the client matcher wins and the node yields exactly one fact.
        let (facts, _) = extract("api.post('/api/orders');\n");
        let api: Vec<&Fact> = facts
            .iter()
            .filter(|f| f.kind == FactKind::ApiCall)
            .collect();
        assert_eq!(api.len(), 1);
        assert_eq!(api[0].identity_key, "POST:/api/orders");
    }

    #[test]
    fn mixed_file_yields_all_kinds() {
        let src = concat!(
            "const CartContext = createContext(null);\n",
            "const cartSlice = createSlice({ name: 'cart', reducers: {} });\n",
            "const addItem = createAction('cart/addItem');\n",
            "function CartPage() {\n",
            "  const [items, setItems] = useState([]);\n",
            "  fetch('/api/cart');\n",
            "  return <Button variant=\"text\" />;\n",
            "}\n",
            "const r = <Route path=\"/cart\" element={<CartPage />} />;\n",
        );
        let (facts, _) = extract(src);
        let mut kinds: Vec<FactKind> = facts.iter().map(|f| f.kind).collect();
        kinds.dedup();
        for kind in [
            FactKind::ContextProvider,
            FactKind::ReduxReducer,
            FactKind::ReduxAction,
            FactKind::StateHook,
            FactKind::ApiCall,
            FactKind::ComponentUsage,
            FactKind::RouteDef,
        ] {
            assert!(kinds.contains(&kind), "missing {kind}");
        }
    }

    #[test]
    fn empty_file_yields_nothing() {
        let (facts, diags) = extract("");
        assert!(facts.is_empty());
        assert!(diags.is_empty());
    }
}
