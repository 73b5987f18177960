//! RDF statement model for geordf
//!
//! This crate provides the statement types stored in the geometry index and
//! the bit-exact codec that moves them to and from the backend.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - IRIs are stored in expanded form.
//!
//! 2. **Datatype xor language** - A literal is plain, typed or
//!    language-tagged; [`Annotation`] makes "both" unrepresentable.
//!
//! 3. **No shared factory** - Terms are built with plain constructors
//!    (`Resource::iri`, `Term::wkt`, ...); nothing is global.
//!
//! # Example
//!
//! ```
//! use geordf_graph_ir::{codec, Resource, Statement, Term};
//!
//! let st = Statement::new(
//!     Resource::blank("b0"),
//!     "http://www.opengis.net/ont/geosparql#asWKT",
//!     Term::wkt("POINT (1 2)"),
//! )
//! .with_context("urn:graph:places");
//!
//! let wire = codec::encode(&st);
//! assert_eq!(codec::decode(&wire).unwrap(), st);
//! ```

pub mod codec;
mod error;
mod statement;
mod term;

pub use error::{Result, SerializationError};
pub use statement::Statement;
pub use term::{Annotation, BlankId, Literal, Resource, Term};
