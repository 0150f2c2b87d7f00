//! Component usage matcher for capitalized JSX tags.

use codemig_core::{Fact, FactKind};
use tree_sitter::Node;

use crate::jsx;
use crate::matcher::{MatchContext, Matcher};
use crate::util::location;

/// `<Button ... />` and other capitalized-tag JSX elements.
///
/// Member tags (`<Cart.Provider>`) are left to the context matcher.
pub(crate) struct ComponentUsageMatcher;

impl Matcher for ComponentUsageMatcher {
    fn name(&self) -> &'static str {
        "component-usage"
    }

    fn kind(&self) -> FactKind {
        FactKind::ComponentUsage
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if !cx.unit.dialect.jsx || !jsx::is_element(node) {
            return None;
        }
        let tag_node = jsx::tag_node(node)?;
        if !matches!(tag_node.kind(), "identifier" | "jsx_identifier") {
            return None;
        }
        let tag = cx.unit.node_text(tag_node);
        if !tag.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }

        let mut props: Vec<String> = jsx::attributes(node, cx.unit)
            .into_iter()
            .map(|a| a.name)
            .collect();
        props.sort_unstable();

        let loc = location(cx.unit, node);
        Some(
            Fact::new(self.kind(), format!("component:{tag}"), loc)
                .with_attr("tag", tag)
                .with_attr("props", props.join(","))
                .with_node_span(node.start_byte(), node.end_byte()),
        )
    }
}
