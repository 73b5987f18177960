//! Statement wire codec
//!
//! A statement is written as four fields joined by NUL (U+0000):
//!
//! ```text
//! context \0 subject \0 predicate \0 object
//! ```
//!
//! An absent context leaves the leading field empty, so the encoding starts
//! with the separator. Resources are written as the bare IRI or `_:id`;
//! literals as `"label"`, `"label"@lang` or `"label"^^<datatype>`.
//!
//! The same per-field rules are used when the four components arrive as
//! separate feature attributes ([`decode_parts`]).
//!
//! # Example
//!
//! ```
//! use geordf_graph_ir::{codec, Resource, Statement, Term};
//!
//! let st = Statement::new(
//!     Resource::iri("urn:a"),
//!     "http://www.opengis.net/ont/geosparql#asWKT",
//!     Term::wkt("POINT (2 4)"),
//! );
//! let wire = codec::encode(&st);
//! assert!(wire.starts_with('\0'));
//! assert_eq!(codec::decode(&wire).unwrap(), st);
//! ```

use crate::error::{Result, SerializationError};
use crate::{Literal, Resource, Statement, Term};
use std::sync::Arc;

/// Field separator.
pub const SEPARATOR: char = '\u{0}';

/// Number of fields in the joined encoding.
const FIELD_COUNT: usize = 4;

const BLANK_PREFIX: &str = "_:";

/// Encode a statement as its NUL-joined wire string.
pub fn encode(statement: &Statement) -> String {
    let mut out = String::new();
    out.push_str(&write_context(statement));
    out.push(SEPARATOR);
    out.push_str(&write_subject(statement));
    out.push(SEPARATOR);
    out.push_str(&write_predicate(statement));
    out.push(SEPARATOR);
    out.push_str(&write_object(statement));
    out
}

/// Decode a NUL-joined wire string.
pub fn decode(input: &str) -> Result<Statement> {
    let fields: Vec<&str> = input.split(SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(SerializationError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }
    decode_parts(fields[1], fields[2], fields[3], fields[0])
}

/// Decode a statement from its four discrete attribute strings.
///
/// An empty `context` means the default graph.
pub fn decode_parts(subject: &str, predicate: &str, object: &str, context: &str) -> Result<Statement> {
    let subject = parse_resource(subject, "subject")?;
    if predicate.is_empty() {
        return Err(SerializationError::EmptyField("predicate"));
    }
    let object = parse_object(object)?;
    let context = if context.is_empty() {
        None
    } else {
        Some(Arc::from(context))
    };

    Ok(Statement {
        subject,
        predicate: Arc::from(predicate),
        object,
        context,
    })
}

pub fn write_subject(statement: &Statement) -> String {
    statement.subject.to_string()
}

pub fn write_predicate(statement: &Statement) -> String {
    statement.predicate.to_string()
}

pub fn write_object(statement: &Statement) -> String {
    statement.object.to_string()
}

/// Context attribute; empty when the statement is in the default graph.
pub fn write_context(statement: &Statement) -> String {
    statement.context().unwrap_or_default().to_string()
}

fn parse_object(field: &str) -> Result<Term> {
    if field.starts_with('"') {
        parse_literal(field).map(Term::Literal)
    } else {
        parse_resource(field, "object").map(Term::from)
    }
}

fn parse_resource(field: &str, position: &'static str) -> Result<Resource> {
    if field.is_empty() {
        return Err(SerializationError::EmptyField(position));
    }
    match field.strip_prefix(BLANK_PREFIX) {
        Some("") => Err(SerializationError::EmptyField(position)),
        Some(id) => Ok(Resource::blank(id)),
        None => Ok(Resource::iri(field)),
    }
}

/// Parse `"label"`, `"label"@lang` or `"label"^^<datatype>`.
///
/// The label ends at the last quote in the field, so labels may contain
/// quotes themselves.
fn parse_literal(field: &str) -> Result<Literal> {
    let body = &field[1..];
    let close = body
        .rfind('"')
        .ok_or_else(|| SerializationError::UnterminatedLiteral(field.to_string()))?;
    let label = &body[..close];
    let suffix = &body[close + 1..];

    if suffix.is_empty() {
        return Ok(Literal::plain(label));
    }
    if let Some(lang) = suffix.strip_prefix('@') {
        if lang.is_empty() {
            return Err(SerializationError::MalformedLiteral(field.to_string()));
        }
        return Ok(Literal::lang(label, lang));
    }
    match suffix
        .strip_prefix("^^<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        Some(datatype) if !datatype.is_empty() => Ok(Literal::typed(label, datatype)),
        _ => Err(SerializationError::MalformedLiteral(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geordf_vocab::{geo, xsd};

    fn point_statement() -> Statement {
        Statement::new(
            Resource::iri("uri:feature/1"),
            geo::AS_WKT,
            Term::wkt("POINT (2 4)"),
        )
    }

    #[test]
    fn test_encode_without_context_starts_with_separator() {
        let wire = encode(&point_statement());
        assert_eq!(
            wire,
            format!(
                "\0uri:feature/1\0{}\0\"POINT (2 4)\"^^<{}>",
                geo::AS_WKT,
                geo::WKT_LITERAL
            )
        );
    }

    #[test]
    fn test_roundtrip_without_context() {
        let st = point_statement();
        assert_eq!(decode(&encode(&st)).unwrap(), st);
    }

    #[test]
    fn test_roundtrip_with_context() {
        let st = point_statement().with_context("urn:graph:g1");
        let wire = encode(&st);
        assert!(wire.starts_with("urn:graph:g1\0"));
        assert_eq!(decode(&wire).unwrap(), st);
    }

    #[test]
    fn test_roundtrip_literal_kinds() {
        let subject = Resource::iri("urn:s");
        for object in [
            Term::plain("plain value"),
            Term::lang_string("bonjour", "fr-CA"),
            Term::typed("42", xsd::INTEGER),
            Term::plain(""),
        ] {
            let st = Statement::new(subject.clone(), "urn:p", object);
            assert_eq!(decode(&encode(&st)).unwrap(), st);
        }
    }

    #[test]
    fn test_roundtrip_blank_nodes() {
        let st = Statement::new(Resource::blank("b0"), "urn:p", Term::blank("b1"));
        let wire = encode(&st);
        assert_eq!(wire, "\0_:b0\0urn:p\0_:b1");
        assert_eq!(decode(&wire).unwrap(), st);
    }

    #[test]
    fn test_label_may_contain_quotes() {
        let st = Statement::new(
            Resource::iri("urn:s"),
            "urn:p",
            Term::lang_string("say \"hi\"", "en"),
        );
        assert_eq!(decode(&encode(&st)).unwrap(), st);
    }

    #[test]
    fn test_decode_wrong_field_count() {
        assert_eq!(
            decode("urn:s\0urn:p\0urn:o"),
            Err(SerializationError::FieldCount {
                expected: 4,
                found: 3
            })
        );
        assert!(matches!(
            decode("\0a\0b\0c\0d"),
            Err(SerializationError::FieldCount { found: 5, .. })
        ));
    }

    #[test]
    fn test_decode_unterminated_literal() {
        let err = decode_parts("urn:s", "urn:p", "\"POINT (1 2)", "").unwrap_err();
        assert!(matches!(err, SerializationError::UnterminatedLiteral(_)));

        let err = decode_parts("urn:s", "urn:p", "\"", "").unwrap_err();
        assert!(matches!(err, SerializationError::UnterminatedLiteral(_)));
    }

    #[test]
    fn test_decode_malformed_suffix() {
        for object in ["\"x\"junk", "\"x\"^^<urn:dt", "\"x\"@", "\"x\"^^<>"] {
            let err = decode_parts("urn:s", "urn:p", object, "").unwrap_err();
            assert!(
                matches!(err, SerializationError::MalformedLiteral(_)),
                "{object}: {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_empty_fields() {
        assert_eq!(
            decode_parts("", "urn:p", "urn:o", ""),
            Err(SerializationError::EmptyField("subject"))
        );
        assert_eq!(
            decode_parts("urn:s", "", "urn:o", ""),
            Err(SerializationError::EmptyField("predicate"))
        );
        assert_eq!(
            decode("\0urn:s\0urn:p\0"),
            Err(SerializationError::EmptyField("object"))
        );
        assert_eq!(
            decode_parts("_:", "urn:p", "urn:o", ""),
            Err(SerializationError::EmptyField("subject"))
        );
    }

    #[test]
    fn test_per_field_writers() {
        let st = point_statement();
        assert_eq!(write_subject(&st), "uri:feature/1");
        assert_eq!(write_predicate(&st), geo::AS_WKT);
        assert_eq!(
            write_object(&st),
            format!("\"POINT (2 4)\"^^<{}>", geo::WKT_LITERAL)
        );
        assert_eq!(write_context(&st), "");
        assert_eq!(write_context(&st.with_context("urn:g")), "urn:g");
    }
}
