//! Topological query translation.
//!
//! Each query is exactly one DE-9IM named predicate against one geometry.
//! The resulting [`FilterExpr`] stays structured (operation, attribute,
//! geometry value) so backends evaluate it without re-parsing text; its
//! `Display` gives the canonical form `OPERATION(geom, <WKT>)`.

use crate::error::{GeoIndexError, Result};
use crate::feature::GEOMETRY_ATTRIBUTE;
use crate::geometry::to_wkt;
use geo::Relate;
use geo_types::Geometry;
use geordf_vocab::geof;
use std::fmt;
use std::str::FromStr;

/// DE-9IM named predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialOp {
    Equals,
    Disjoint,
    Intersects,
    Touches,
    Crosses,
    Within,
    Contains,
    Overlaps,
}

impl SpatialOp {
    pub const ALL: [SpatialOp; 8] = [
        SpatialOp::Equals,
        SpatialOp::Disjoint,
        SpatialOp::Intersects,
        SpatialOp::Touches,
        SpatialOp::Crosses,
        SpatialOp::Within,
        SpatialOp::Contains,
        SpatialOp::Overlaps,
    ];

    /// Filter-syntax name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialOp::Equals => "EQUALS",
            SpatialOp::Disjoint => "DISJOINT",
            SpatialOp::Intersects => "INTERSECTS",
            SpatialOp::Touches => "TOUCHES",
            SpatialOp::Crosses => "CROSSES",
            SpatialOp::Within => "WITHIN",
            SpatialOp::Contains => "CONTAINS",
            SpatialOp::Overlaps => "OVERLAPS",
        }
    }

    /// GeoSPARQL simple features function IRI.
    pub fn function_iri(&self) -> &'static str {
        match self {
            SpatialOp::Equals => geof::SF_EQUALS,
            SpatialOp::Disjoint => geof::SF_DISJOINT,
            SpatialOp::Intersects => geof::SF_INTERSECTS,
            SpatialOp::Touches => geof::SF_TOUCHES,
            SpatialOp::Crosses => geof::SF_CROSSES,
            SpatialOp::Within => geof::SF_WITHIN,
            SpatialOp::Contains => geof::SF_CONTAINS,
            SpatialOp::Overlaps => geof::SF_OVERLAPS,
        }
    }

    /// Map a `geof:sf*` function IRI onto its operation.
    pub fn from_function_iri(iri: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.function_iri() == iri)
            .ok_or_else(|| GeoIndexError::QueryTranslation(iri.to_string()))
    }

    /// Whether a candidate must share at least one point with the query
    /// geometry to match. Backends may use a bbox prefilter only when true.
    pub fn requires_intersection(&self) -> bool {
        !matches!(self, SpatialOp::Disjoint)
    }

    /// Evaluate `candidate OP query` with exact DE-9IM semantics.
    pub fn evaluate(&self, candidate: &Geometry<f64>, query: &Geometry<f64>) -> bool {
        let matrix = candidate.relate(query);
        match self {
            SpatialOp::Equals => matrix.is_equal_topo(),
            SpatialOp::Disjoint => matrix.is_disjoint(),
            SpatialOp::Intersects => matrix.is_intersects(),
            SpatialOp::Touches => matrix.is_touches(),
            SpatialOp::Crosses => matrix.is_crosses(),
            SpatialOp::Within => matrix.is_within(),
            SpatialOp::Contains => matrix.is_contains(),
            SpatialOp::Overlaps => matrix.is_overlaps(),
        }
    }
}

impl fmt::Display for SpatialOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpatialOp {
    type Err = GeoIndexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GeoIndexError::QueryTranslation(s.to_string()))
    }
}

/// A single-predicate filter over the geometry attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub op: SpatialOp,
    pub attribute: &'static str,
    pub geometry: Geometry<f64>,
}

impl FilterExpr {
    /// True if a stored geometry satisfies this filter.
    pub fn matches(&self, candidate: &Geometry<f64>) -> bool {
        self.op.evaluate(candidate, &self.geometry)
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.op, self.attribute, to_wkt(&self.geometry))
    }
}

/// Translate an operation and query geometry into a filter expression.
pub fn translate(op: SpatialOp, geometry: &Geometry<f64>) -> FilterExpr {
    FilterExpr {
        op,
        attribute: GEOMETRY_ATTRIBUTE,
        geometry: geometry.clone(),
    }
}
