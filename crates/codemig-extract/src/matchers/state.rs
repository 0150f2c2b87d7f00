//! State-management matchers: React hooks and contexts.

use codemig_core::{Fact, FactKind};
use tree_sitter::Node;

use crate::jsx;
use crate::matcher::{MatchContext, Matcher};
use crate::util::{declarator_name, enclosing_function, location};

/// Hook names recognized as state-management constructs.
const HOOKS: &[&str] = &[
    "useState",
    "useReducer",
    "useEffect",
    "useLayoutEffect",
    "useMemo",
    "useCallback",
    "useRef",
    "useContext",
];

/// React hook call sites.
pub(crate) struct HookMatcher;

impl Matcher for HookMatcher {
    fn name(&self) -> &'static str {
        "state-hook"
    }

    fn kind(&self) -> FactKind {
        FactKind::StateHook
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let func = node.child_by_field_name("function")?;
        if func.kind() != "identifier" {
            return None;
        }
        let hook = cx.unit.node_text(func);
        if !HOOKS.contains(&hook) {
            return None;
        }

        // Prefer the bound name (`const [count] = useState(...)`); effects
        // and other unbound hooks key off the enclosing component.
        let binding = declarator_name(node, cx.unit)
            .or_else(|| enclosing_function(node, cx.unit))
            .unwrap_or_else(|| "<anonymous>".into());

        let loc = location(cx.unit, node);
        Some(
            Fact::new(self.kind(), format!("hook:{hook}:{binding}"), loc)
                .with_attr("hook", hook)
                .with_attr("binding", binding)
                .with_node_span(node.start_byte(), node.end_byte()),
        )
    }
}

/// `createContext(...)` assignments and `<X.Provider>` elements.
pub(crate) struct ContextMatcher;

impl Matcher for ContextMatcher {
    fn name(&self) -> &'static str {
        "context-provider"
    }

    fn kind(&self) -> FactKind {
        FactKind::ContextProvider
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() == "call_expression" {
            let func = node.child_by_field_name("function")?;
            if func.kind() != "identifier" || cx.unit.node_text(func) != "createContext" {
                return None;
            }
            let name =
                declarator_name(node, cx.unit).unwrap_or_else(|| "<anonymous>".into());
            let loc = location(cx.unit, node);
            return Some(
                Fact::new(self.kind(), format!("context:{name}"), loc)
                    .with_attr("name", name)
                    .with_attr("site", "createContext")
                    .with_node_span(node.start_byte(), node.end_byte()),
            );
        }

        if cx.unit.dialect.jsx && jsx::is_element(node) {
            let tag = jsx::tag_name(node, cx.unit)?;
            let name = tag.strip_suffix(".Provider")?;
            if name.is_empty() {
                return None;
            }
            let loc = location(cx.unit, node);
            return Some(
                Fact::new(self.kind(), format!("context:{name}"), loc)
                    .with_attr("name", name)
                    .with_attr("site", "provider-element")
                    .with_node_span(node.start_byte(), node.end_byte()),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FactExtractor;
    use crate::options::ExtractOptions;
    use codemig_core::load_source;
    use std::path::Path;

    fn extract(src: &str) -> Vec<Fact> {
        let unit = load_source(Path::new("t.jsx"), src.into(), 1 << 20).expect("parse");
        FactExtractor::new()
            .extract(&unit, &ExtractOptions::default())
            .0
    }

    fn keys(facts: &[Fact], kind: FactKind) -> Vec<&str> {
        facts
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.identity_key.as_str())
            .collect()
    }

    #[test]
    fn use_state_keyed_by_binding() {
        let facts = extract("const [count, setCount] = useState(0);\n");
        assert_eq!(
            keys(&facts, FactKind::StateHook),
            vec!["hook:useState:count"]
        );
    }

    #[test]
    fn use_effect_keyed_by_component() {
        let src = "function ProductPage() { useEffect(() => {}, []); return null; }\n";
        let facts = extract(src);
        assert_eq!(
            keys(&facts, FactKind::StateHook),
            vec!["hook:useEffect:ProductPage"]
        );
    }

    #[test]
    fn arrow_component_name_used() {
        let src = "const Cart = () => { useEffect(() => {}, []); return null; };\n";
        let facts = extract(src);
        assert_eq!(keys(&facts, FactKind::StateHook), vec!["hook:useEffect:Cart"]);
    }

    #[test]
    fn non_hook_call_ignored() {
        let facts = extract("useSomethingCustom();\n");
        assert!(keys(&facts, FactKind::StateHook).is_empty());
    }

    #[test]
    fn create_context_named_from_declarator() {
        let facts = extract("const CartContext = createContext(null);\n");
        assert_eq!(
            keys(&facts, FactKind::ContextProvider),
            vec!["context:CartContext"]
        );
    }

    #[test]
    fn provider_element_captured() {
        let facts = extract("const x = <CartContext.Provider value={v}>{c}</CartContext.Provider>;\n");
        assert_eq!(
            keys(&facts, FactKind::ContextProvider),
            vec!["context:CartContext"]
        );
    }

    #[test]
    fn context_definition_and_provider_dedupe_to_one_key() {
        let src = "const CartContext = createContext(null);\nconst x = <CartContext.Provider value={v}>{c}</CartContext.Provider>;\n";
        let facts = extract(src);
        let ks = keys(&facts, FactKind::ContextProvider);
        // Two sites, one logical entity; the store dedups by identity key.
        assert_eq!(ks, vec!["context:CartContext", "context:CartContext"]);
    }
}
