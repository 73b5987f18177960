//! Predicate admission filter.

use geordf_graph_ir::Statement;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Decides which statements are eligible for geometry indexing.
///
/// An empty allow-list admits every predicate. Statements with an IRI or
/// blank-node object are never indexable, whatever their predicate.
#[derive(Debug, Clone, Default)]
pub struct PredicateFilter {
    allowed: FxHashSet<Arc<str>>,
}

impl PredicateFilter {
    pub fn new<I, S>(predicates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: predicates
                .into_iter()
                .map(|p| Arc::from(p.as_ref()))
                .collect(),
        }
    }

    /// Filter that admits every predicate.
    pub fn admit_all() -> Self {
        Self::default()
    }

    /// True if the allow-list is empty or contains `predicate`.
    pub fn admits(&self, predicate: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(predicate)
    }

    /// True if the predicate is admitted and the object is a literal.
    pub fn is_indexable(&self, statement: &Statement) -> bool {
        self.admits(statement.predicate()) && statement.object.is_literal()
    }

    /// The configured allow-list (empty means "all").
    pub fn predicates(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(|p| p.as_ref())
    }
}
