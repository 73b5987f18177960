//! RDF statement: subject, predicate, object and optional named-graph context

use crate::{Resource, Term};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A subject–predicate–object triple, optionally scoped to a named graph.
///
/// Statements are immutable values; all fields are always present except
/// the context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Resource,
    /// Predicate IRI
    pub predicate: Arc<str>,
    pub object: Term,
    /// Named graph IRI
    pub context: Option<Arc<str>>,
}

impl Statement {
    /// Create a statement in the default graph
    pub fn new(subject: Resource, predicate: impl AsRef<str>, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate: Arc::from(predicate.as_ref()),
            object: object.into(),
            context: None,
        }
    }

    /// Scope this statement to a named graph
    pub fn with_context(mut self, context: impl AsRef<str>) -> Self {
        self.context = Some(Arc::from(context.as_ref()));
        self
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)?;
        if let Some(ctx) = &self.context {
            write!(f, " [{}]", ctx)?;
        }
        Ok(())
    }
}
