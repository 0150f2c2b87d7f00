//! Redux matchers: slices/reducers and actions.

use codemig_core::{Fact, FactKind, DYNAMIC_TOKEN};
use tree_sitter::Node;

use crate::matcher::{MatchContext, Matcher};
use crate::util::{declarator_name, location, object_string_property, string_value};

/// `createSlice({ name })` and `createReducer(...)` definitions.
pub(crate) struct SliceMatcher;

impl Matcher for SliceMatcher {
    fn name(&self) -> &'static str {
        "redux-slice"
    }

    fn kind(&self) -> FactKind {
        FactKind::ReduxReducer
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let func = node.child_by_field_name("function")?;
        if func.kind() != "identifier" {
            return None;
        }
        let callee = cx.unit.node_text(func);
        let args = node.child_by_field_name("arguments")?;

        let name = match callee {
            "createSlice" => {
                let config = args.named_child(0)?;
                match object_string_property(config, cx.unit, "name") {
                    Some(Some(n)) => n,
                    Some(None) => {
                        let loc = location(cx.unit, node);
                        cx.note_unresolved(loc, "slice name");
                        DYNAMIC_TOKEN.to_owned()
                    }
                    None => declarator_name(node, cx.unit).unwrap_or_else(|| "<anonymous>".into()),
                }
            }
            "createReducer" => {
                declarator_name(node, cx.unit).unwrap_or_else(|| "<anonymous>".into())
            }
            _ => return None,
        };

        let loc = location(cx.unit, node);
        Some(
            Fact::new(self.kind(), format!("reducer:{name}"), loc)
                .with_attr("name", name)
                .with_attr("factory", callee)
                .with_node_span(node.start_byte(), node.end_byte()),
        )
    }
}

/// `createAction('t')`, `createAsyncThunk('t', ...)`, and
/// `dispatch({ type: 't' })` action sites.
pub(crate) struct ActionMatcher;

impl Matcher for ActionMatcher {
    fn name(&self) -> &'static str {
        "redux-action"
    }

    fn kind(&self) -> FactKind {
        FactKind::ReduxAction
    }

    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact> {
        if node.kind() != "call_expression" {
            return None;
        }
        let func = node.child_by_field_name("function")?;
        let args = node.child_by_field_name("arguments")?;

        let callee = match func.kind() {
            "identifier" => cx.unit.node_text(func),
            "member_expression" => func
                .child_by_field_name("property")
                .map(|p| cx.unit.node_text(p))?,
            _ => return None,
        };

        let action_type = match callee {
            "createAction" | "createAsyncThunk" => {
                let first = args.named_child(0)?;
                match string_value(first, cx.unit) {
                    Some(t) => t,
                    None => {
                        let loc = location(cx.unit, node);
                        cx.note_unresolved(loc, "action type");
                        DYNAMIC_TOKEN.to_owned()
                    }
                }
            }
            "dispatch" => {
                let first = args.named_child(0)?;
                if first.kind() != "object" {
                    // dispatch(addItem(...)) — the creator site is the fact.
                    return None;
                }
                match object_string_property(first, cx.unit, "type")? {
                    Some(t) => t,
                    None => {
                        let loc = location(cx.unit, node);
                        cx.note_unresolved(loc, "action type");
                        DYNAMIC_TOKEN.to_owned()
                    }
                }
            }
            _ => return None,
        };

        let loc = location(cx.unit, node);
        Some(
            Fact::new(self.kind(), format!("action:{action_type}"), loc)
                .with_attr("type", action_type)
                .with_node_span(node.start_byte(), node.end_byte()),
        )
    }
}
