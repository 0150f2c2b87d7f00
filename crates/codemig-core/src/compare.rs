//! Cross-comparison of two fact sets.
//!
//! Produces the matched/unmatched partition between an "old" and a "new"
//! interface, with a pattern-equivalence fallback that tolerates
//! parameter-name drift.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::store::FactSet;
use crate::types::Fact;

/// A pair of facts matched across the two sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    /// The fact from set A.
    pub a: Fact,
    /// The fact from set B.
    pub b: Fact,
    /// `true` when the pair matched only via pattern equivalence,
    /// i.e. the paths agree but parameter names drifted.
    pub params_differ: bool,
}

/// Result of comparing two fact sets.
///
/// Every fact in A appears in exactly one of `common` or `only_in_a`;
/// symmetrically for B.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Facts present in both sets.
    pub common: Vec<MatchedPair>,
    /// Facts only present in set A.
    pub only_in_a: Vec<Fact>,
    /// Facts only present in set B.
    pub only_in_b: Vec<Fact>,
}

impl ComparisonResult {
    /// Whether the two interfaces diverge at all.
    #[must_use]
    pub fn has_drift(&self) -> bool {
        !self.only_in_a.is_empty()
            || !self.only_in_b.is_empty()
            || self.common.iter().any(|p| p.params_differ)
    }

    /// Counts of (common, only-in-A, only-in-B).
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.common.len(), self.only_in_a.len(), self.only_in_b.len())
    }
}

/// Compares two fact sets.
///
/// 1. Exact pass: facts whose identity keys exist in both sets match with
///    `params_differ: false`.
/// 2. Pattern-equivalence pass: a remaining fact in A matches a remaining
///    fact in B of the same kind when their wildcard patterns are equal.
///    When several candidates exist, the first in B's insertion order wins;
///    this is deterministic, not best-fit.
/// 3. Leftovers go to `only_in_a` / `only_in_b`.
#[must_use]
pub fn compare(a: &FactSet, b: &FactSet) -> ComparisonResult {
    let mut result = ComparisonResult::default();
    let mut matched_a: HashSet<&str> = HashSet::new();
    let mut matched_b: HashSet<&str> = HashSet::new();

    // Pass 1: exact identity-key matches.
    for fact_a in a.iter() {
        if let Some(fact_b) = b.get(&fact_a.identity_key) {
            matched_a.insert(fact_a.identity_key.as_str());
            matched_b.insert(fact_b.identity_key.as_str());
            result.common.push(MatchedPair {
                a: fact_a.clone(),
                b: fact_b.clone(),
                params_differ: false,
            });
        }
    }

    // Pass 2: pattern-equivalence fallback for parameter-name drift.
    for fact_a in a.iter() {
        if matched_a.contains(fact_a.identity_key.as_str()) {
            continue;
        }
        let Some(pattern_a) = &fact_a.pattern else {
            continue;
        };
        let candidate = b.iter().find(|fact_b| {
            fact_b.kind == fact_a.kind
                && !matched_b.contains(fact_b.identity_key.as_str())
                && fact_b.pattern.as_deref() == Some(pattern_a.as_str())
        });
        if let Some(fact_b) = candidate {
            debug!(
                "pattern-equivalent match: {} ~ {}",
                fact_a.identity_key, fact_b.identity_key
            );
            matched_a.insert(fact_a.identity_key.as_str());
            matched_b.insert(fact_b.identity_key.as_str());
            result.common.push(MatchedPair {
                a: fact_a.clone(),
                b: fact_b.clone(),
                params_differ: true,
            });
        }
    }

    // Pass 3: leftovers.
    for fact_a in a.iter() {
        if !matched_a.contains(fact_a.identity_key.as_str()) {
            result.only_in_a.push(fact_a.clone());
        }
    }
    for fact_b in b.iter() {
        if !matched_b.contains(fact_b.identity_key.as_str()) {
            result.only_in_b.push(fact_b.clone());
        }
    }

    result
}
