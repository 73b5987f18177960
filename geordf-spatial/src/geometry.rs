//! Geometry extraction from statement literals.
//!
//! This module provides:
//! - WKT parsing into `geo_types::Geometry`
//! - Extraction of the geometry carried by a statement's literal object
//! - Bounding boxes used by backends to prefilter candidates
//!
//! # Datatype handling
//!
//! Geometry literals are expected to be typed `geo:wktLiteral`. A literal
//! with another datatype (or none) is still parsed; the mismatch is logged
//! and reported on the [`ExtractedGeometry`] rather than rejected.

use crate::error::GeometryParseError;
use geo::BoundingRect;
use geo_types::Geometry;
use geordf_graph_ir::{Statement, Term};
use geordf_vocab::geo as geo_vocab;
use wkt::{ToWkt, TryFromWkt};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BBox {
    /// Check if this bbox intersects another (shared edges count).
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
            && self.min_lng <= other.max_lng
            && self.max_lng >= other.min_lng
    }

    /// Compute from a geo-types Geometry.
    ///
    /// Returns `None` for empty geometries.
    pub fn from_geometry(geom: &Geometry<f64>) -> Option<Self> {
        let rect = geom.bounding_rect()?;
        Some(Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        })
    }
}

/// Geometry read from a statement.
#[derive(Debug, Clone)]
pub struct ExtractedGeometry {
    pub geometry: Geometry<f64>,

    /// The literal was not typed `geo:wktLiteral`.
    pub datatype_mismatch: bool,
}

/// Parse WKT string to geo-types Geometry.
pub fn parse_wkt(wkt: &str) -> Result<Geometry<f64>, GeometryParseError> {
    Geometry::try_from_wkt_str(wkt).map_err(|e| GeometryParseError::WktParse(e.to_string()))
}

/// Render a geometry as WKT.
pub fn to_wkt(geom: &Geometry<f64>) -> String {
    geom.wkt_string()
}

/// Extract the geometry carried by a statement's literal object.
///
/// Fails when the object is not a literal or its label is not valid WKT.
pub fn extract_geometry(statement: &Statement) -> Result<ExtractedGeometry, GeometryParseError> {
    let literal = match &statement.object {
        Term::Literal(lit) => lit,
        _ => return Err(GeometryParseError::NotALiteral(statement.to_string())),
    };

    let datatype_mismatch = literal.datatype() != Some(geo_vocab::WKT_LITERAL);
    if datatype_mismatch {
        tracing::warn!(
            statement = %statement,
            datatype = literal.datatype().unwrap_or_default(),
            "Literal is not of type geo:wktLiteral, attempting WKT parse anyway"
        );
    }

    let geometry = parse_wkt(literal.label())?;
    Ok(ExtractedGeometry {
        geometry,
        datatype_mismatch,
    })
}
