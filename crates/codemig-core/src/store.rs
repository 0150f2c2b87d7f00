//! Deduplicating, order-preserving fact collection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{Fact, FactKind};

/// An append-only map from identity key to [`Fact`].
///
/// Insertion order is preserved for stable reporting. On identity-key
/// collision the first-seen fact wins and later duplicates are dropped,
/// matching the "one logical endpoint, many call sites" model. Collisions
/// are never an error.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FactSet {
    inner: IndexMap<String, Fact>,
}

impl FactSet {
    /// Creates an empty fact set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fact, keeping the first-seen entry on collision.
    ///
    /// Returns `true` if the fact was inserted, `false` if an entry with
    /// the same identity key already existed.
    pub fn insert(&mut self, fact: Fact) -> bool {
        if self.inner.contains_key(&fact.identity_key) {
            trace!("dropping duplicate fact: {}", fact.identity_key);
            return false;
        }
        self.inner.insert(fact.identity_key.clone(), fact);
        true
    }

    /// Merges another fact set into this one, first-seen-wins.
    pub fn merge(&mut self, other: Self) {
        for (_, fact) in other.inner {
            self.insert(fact);
        }
    }

    /// Looks up a fact by identity key.
    #[must_use]
    pub fn get(&self, identity_key: &str) -> Option<&Fact> {
        self.inner.get(identity_key)
    }

    /// Whether a fact with this identity key is present.
    #[must_use]
    pub fn contains(&self, identity_key: &str) -> bool {
        self.inner.contains_key(identity_key)
    }

    /// Number of facts in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates facts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.inner.values()
    }

    /// Iterates facts of one kind, in insertion order.
    pub fn of_kind(&self, kind: FactKind) -> impl Iterator<Item = &Fact> {
        self.inner.values().filter(move |f| f.kind == kind)
    }
}

impl FromIterator<Fact> for FactSet {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut set = Self::new();
        for fact in iter {
            set.insert(fact);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = &'a Fact;
    type IntoIter = indexmap::map::Values<'a, String, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.values()
    }
}
