//! Matcher trait and per-file match context.

use std::collections::HashSet;

use codemig_core::{Diagnostic, Fact, FactKind, Location, SourceUnit};
use tree_sitter::Node;

use crate::options::ExtractOptions;

/// Per-file state threaded through the matchers.
pub struct MatchContext<'u> {
    /// The unit being extracted.
    pub unit: &'u SourceUnit,
    /// Recognition options.
    pub options: &'u ExtractOptions,
    /// Node ids claimed by a specific matcher; generic fallbacks skip them.
    consumed: HashSet<usize>,
    /// Diagnostics accumulated during the walk.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'u> MatchContext<'u> {
    /// Creates a fresh context for one unit.
    #[must_use]
    pub fn new(unit: &'u SourceUnit, options: &'u ExtractOptions) -> Self {
        Self {
            unit,
            options,
            consumed: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Claims a node so lower-priority matchers leave it alone.
    pub fn consume(&mut self, node: Node<'_>) {
        self.consumed.insert(node.id());
    }

    /// Whether a node was already claimed.
    #[must_use]
    pub fn is_consumed(&self, node: Node<'_>) -> bool {
        self.consumed.contains(&node.id())
    }

    /// Records that an attribute could not be statically determined.
    pub fn note_unresolved(&mut self, location: Location, what: &str) {
        self.diagnostics
            .push(Diagnostic::unresolved(location, format!("{what} is not statically known")));
    }
}

/// A predicate + attribute-capture pair for one fact kind.
///
/// Matchers are tried in a fixed priority order per node. Returning
/// `Some(fact)` claims that kind for the node; matchers of the same kind
/// later in the order are then skipped for it.
pub trait Matcher: Send + Sync {
    /// Short name, for logging.
    fn name(&self) -> &'static str;

    /// The fact kind this matcher produces.
    fn kind(&self) -> FactKind;

    /// Tries to capture a fact from the node.
    fn try_match(&self, node: Node<'_>, cx: &mut MatchContext<'_>) -> Option<Fact>;
}

/// Type alias for boxed matcher trait objects.
pub type MatcherBox = Box<dyn Matcher>;
