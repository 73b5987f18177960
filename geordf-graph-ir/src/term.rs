//! RDF term types: IRI, blank node, and literal
//!
//! Terms are the building blocks of statements:
//! - A [`Resource`] (IRI or blank node) may appear as subject or object
//! - A [`Literal`] (label + optional datatype *or* language tag) may only
//!   appear as object
//!
//! The `Display` impls render the wire form used by [`crate::codec`]: IRIs
//! are written bare (no angle brackets), blank nodes as `_:id`, literals as
//! `"label"`, `"label"@lang` or `"label"^^<datatype>`.

use geordf_vocab::geo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a dataset but have no global meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label
    ///
    /// The label should NOT include the `_:` prefix.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// A node that can stand in subject position: an IRI or a blank node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    /// Full expanded IRI
    Iri(Arc<str>),
    /// Blank node
    BlankNode(BlankId),
}

impl Resource {
    /// Create an IRI resource
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Resource::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node resource
    pub fn blank(label: impl AsRef<str>) -> Self {
        Resource::BlankNode(BlankId::new(label))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Resource::BlankNode(_))
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Resource::Iri(iri) => Some(iri),
            Resource::BlankNode(_) => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Iri(iri) => f.write_str(iri),
            Resource::BlankNode(id) => write!(f, "{}", id),
        }
    }
}

/// Literal annotation.
///
/// A literal carries either a datatype or a language tag, never both, so the
/// two are variants of one enum rather than two independent options.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Annotation {
    /// No datatype and no language tag
    Plain,
    /// Datatype IRI
    Typed(Arc<str>),
    /// Language tag
    Lang(Arc<str>),
}

/// An RDF literal
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    label: Arc<str>,
    annotation: Annotation,
}

impl Literal {
    /// Plain literal (no datatype, no language)
    pub fn plain(label: impl AsRef<str>) -> Self {
        Self {
            label: Arc::from(label.as_ref()),
            annotation: Annotation::Plain,
        }
    }

    /// Literal with an explicit datatype IRI
    pub fn typed(label: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        Self {
            label: Arc::from(label.as_ref()),
            annotation: Annotation::Typed(Arc::from(datatype.as_ref())),
        }
    }

    /// Language-tagged literal
    pub fn lang(label: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Self {
            label: Arc::from(label.as_ref()),
            annotation: Annotation::Lang(Arc::from(lang.as_ref())),
        }
    }

    /// `geo:wktLiteral` typed literal
    pub fn wkt(wkt: impl AsRef<str>) -> Self {
        Self::typed(wkt, geo::WKT_LITERAL)
    }

    /// The lexical form
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// Datatype IRI, if the literal is typed
    pub fn datatype(&self) -> Option<&str> {
        match &self.annotation {
            Annotation::Typed(dt) => Some(dt),
            _ => None,
        }
    }

    /// Language tag, if the literal is language-tagged
    pub fn language(&self) -> Option<&str> {
        match &self.annotation {
            Annotation::Lang(lang) => Some(lang),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.label)?;
        match &self.annotation {
            Annotation::Plain => Ok(()),
            Annotation::Typed(dt) => write!(f, "^^<{}>", dt),
            Annotation::Lang(lang) => write!(f, "@{}", lang),
        }
    }
}

/// An RDF term in object position
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - Only the object position of a statement may hold a `Term::Literal`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://schema.org/Person")
    Iri(Arc<str>),

    /// Blank node with stable identifier
    BlankNode(BlankId),

    /// Literal value
    Literal(Literal),
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Create a plain literal
    pub fn plain(label: impl AsRef<str>) -> Self {
        Term::Literal(Literal::plain(label))
    }

    /// Create a typed literal
    pub fn typed(label: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        Term::Literal(Literal::typed(label, datatype))
    }

    /// Create a language-tagged literal
    pub fn lang_string(label: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal(Literal::lang(label, lang))
    }

    /// Create a `geo:wktLiteral`
    pub fn wkt(wkt: impl AsRef<str>) -> Self {
        Term::Literal(Literal::wkt(wkt))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Try to get literal components
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Try to view this term as a resource (IRI or blank node)
    pub fn as_resource(&self) -> Option<Resource> {
        match self {
            Term::Iri(iri) => Some(Resource::Iri(Arc::clone(iri))),
            Term::BlankNode(id) => Some(Resource::BlankNode(id.clone())),
            Term::Literal(_) => None,
        }
    }
}

impl From<Resource> for Term {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Iri(iri) => Term::Iri(iri),
            Resource::BlankNode(id) => Term::BlankNode(id),
        }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => f.write_str(iri),
            Term::BlankNode(id) => write!(f, "{}", id),
            Term::Literal(lit) => write!(f, "{}", lit),
        }
    }
}
