//! Statement codec errors

use thiserror::Error;

/// A wire string or attribute that does not decode to a statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// The joined encoding did not split into context/subject/predicate/object
    #[error("Not a valid statement: expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A required field (subject, predicate, object) was empty
    #[error("Empty {0} field")]
    EmptyField(&'static str),

    /// A literal opened with `"` but never closed
    #[error("Unterminated literal: {0}")]
    UnterminatedLiteral(String),

    /// Text after the closing quote is neither `@lang` nor `^^<datatype>`
    #[error("Malformed literal suffix: {0}")]
    MalformedLiteral(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, SerializationError>;
