//! Statement → feature mapping.
//!
//! A feature is the backend's persisted unit: the geometry parsed from the
//! statement's literal plus the four statement components as string
//! attributes. Its id is a content hash of the statement's wire encoding,
//! so storing the same statement twice overwrites instead of duplicating.

use crate::error::GeometryParseError;
use crate::filter::PredicateFilter;
use crate::geometry::extract_geometry;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use geo_types::Geometry;
use geordf_graph_ir::{codec, SerializationError, Statement};
use geordf_vocab::crs;
use md5::{Digest, Md5};

/// Feature type name.
pub const FEATURE_NAME: &str = "RDF";

pub const SUBJECT_ATTRIBUTE: &str = "S";
pub const PREDICATE_ATTRIBUTE: &str = "P";
pub const OBJECT_ATTRIBUTE: &str = "O";
pub const CONTEXT_ATTRIBUTE: &str = "C";

/// Geometry attribute name.
pub const GEOMETRY_ATTRIBUTE: &str = "geom";

/// Backend schema for statement features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureType {
    pub name: &'static str,
    /// String attributes, in schema order.
    pub attributes: [&'static str; 4],
    pub geometry_attribute: &'static str,
    /// Spatial reference id of the geometry attribute.
    pub srid: u32,
    /// Backends must key features on the provided id instead of generating
    /// their own.
    pub use_provided_ids: bool,
}

impl FeatureType {
    /// The `RDF` feature type: `S`, `P`, `O`, `C` and `geom` at EPSG:4326.
    pub fn statements() -> Self {
        Self {
            name: FEATURE_NAME,
            attributes: [
                SUBJECT_ATTRIBUTE,
                PREDICATE_ATTRIBUTE,
                OBJECT_ATTRIBUTE,
                CONTEXT_ATTRIBUTE,
            ],
            geometry_attribute: GEOMETRY_ATTRIBUTE,
            srid: crs::EPSG_4326,
            use_provided_ids: true,
        }
    }

    /// Schema in `name:Type` form, e.g. `S:String,...,geom:Geometry:srid=4326`.
    pub fn schema_spec(&self) -> String {
        let mut spec: Vec<String> = self
            .attributes
            .iter()
            .map(|a| format!("{}:String", a))
            .collect();
        spec.push(format!("{}:Geometry:srid={}", self.geometry_attribute, self.srid));
        spec.join(",")
    }
}

impl Default for FeatureType {
    fn default() -> Self {
        Self::statements()
    }
}

/// A statement stored as a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Content hash of the statement's wire encoding.
    pub id: String,
    pub geometry: Geometry<f64>,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Empty for the default graph.
    pub context: String,
}

impl Feature {
    /// Look up a string attribute by schema name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            SUBJECT_ATTRIBUTE => Some(&self.subject),
            PREDICATE_ATTRIBUTE => Some(&self.predicate),
            OBJECT_ATTRIBUTE => Some(&self.object),
            CONTEXT_ATTRIBUTE => Some(&self.context),
            _ => None,
        }
    }

    /// Rebuild the statement from the four attributes.
    pub fn to_statement(&self) -> Result<Statement, SerializationError> {
        codec::decode_parts(&self.subject, &self.predicate, &self.object, &self.context)
    }
}

/// Feature id: MD5 of the wire encoding, URL-safe base64 without padding
/// (22 characters).
pub fn feature_id(statement: &Statement) -> String {
    let digest = Md5::digest(codec::encode(statement).as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// Outcome of mapping a single statement.
#[derive(Debug, Clone)]
pub enum MapResult {
    Mapped(Feature),
    /// Predicate not admitted or object not a literal. Not an error.
    Rejected,
    Failed(GeometryParseError),
}

/// Outcome of mapping a batch.
#[derive(Debug, Clone, Default)]
pub struct MappingOutcome {
    pub accepted: Vec<Feature>,
    pub rejected: Vec<(Statement, GeometryParseError)>,
    /// Statements skipped by the predicate filter.
    pub filtered: usize,
}

impl MappingOutcome {
    pub fn feature_ids(&self) -> Vec<String> {
        self.accepted.iter().map(|f| f.id.clone()).collect()
    }
}

/// Builds features from statements.
#[derive(Debug, Clone, Default)]
pub struct FeatureMapper {
    filter: PredicateFilter,
}

impl FeatureMapper {
    pub fn new(filter: PredicateFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &PredicateFilter {
        &self.filter
    }

    /// Map one statement.
    pub fn map(&self, statement: &Statement) -> MapResult {
        if !self.filter.is_indexable(statement) {
            return MapResult::Rejected;
        }

        let extracted = match extract_geometry(statement) {
            Ok(e) => e,
            Err(e) => return MapResult::Failed(e),
        };

        MapResult::Mapped(Feature {
            id: feature_id(statement),
            geometry: extracted.geometry,
            subject: codec::write_subject(statement),
            predicate: codec::write_predicate(statement),
            object: codec::write_object(statement),
            context: codec::write_context(statement),
        })
    }

    /// Map a batch; each statement is independent and failures never abort
    /// the batch.
    pub fn map_all<'a, I>(&self, statements: I) -> MappingOutcome
    where
        I: IntoIterator<Item = &'a Statement>,
    {
        let mut outcome = MappingOutcome::default();
        for statement in statements {
            match self.map(statement) {
                MapResult::Mapped(feature) => outcome.accepted.push(feature),
                MapResult::Rejected => outcome.filtered += 1,
                MapResult::Failed(e) => outcome.rejected.push((statement.clone(), e)),
            }
        }
        outcome
    }
}
