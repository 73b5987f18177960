//! Error types for the geometry index.

use geordf_graph_ir::SerializationError;
use thiserror::Error;

/// A statement whose object cannot be read as a geometry.
///
/// Recovered locally during ingestion: the statement is logged and dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryParseError {
    /// WKT parsing error.
    #[error("WKT parse error: {0}")]
    WktParse(String),

    /// Object is an IRI or blank node rather than a literal.
    #[error("Statement does not contain a literal: {0}")]
    NotALiteral(String),
}

/// Geometry index errors.
#[derive(Error, Debug)]
pub enum GeoIndexError {
    /// A retrieved record did not decode to a statement.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Geometry extraction failed (only surfaced for query geometries).
    #[error(transparent)]
    GeometryParse(#[from] GeometryParseError),

    /// Unknown topological operation name or function IRI.
    #[error("Unsupported spatial operation: {0}")]
    QueryTranslation(String),

    /// Connectivity, schema, read or write failure in the backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A backend write failed; none of the listed features were committed.
    #[error("Batch write of {} features failed: {reason}", feature_ids.len())]
    BatchWrite {
        feature_ids: Vec<String>,
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The index was used after `close()`.
    #[error("Geometry index is closed")]
    IndexClosed,

    /// A result sequence was used after `close()`.
    #[error("Result sequence used after close")]
    UsedAfterClose,

    /// `next` was called on a drained result sequence.
    #[error("Result sequence is exhausted")]
    Exhausted,
}

impl GeoIndexError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        GeoIndexError::Backend(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        GeoIndexError::Config(msg.into())
    }
}

/// Result type for geometry index operations.
pub type Result<T> = std::result::Result<T, GeoIndexError>;
