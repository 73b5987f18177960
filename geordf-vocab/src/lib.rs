//! RDF Vocabulary Constants for geordf
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! used by the statement codec and the geometry index.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `geo` - GeoSPARQL ontology (http://www.opengis.net/ont/geosparql#)
//! - `geof` - GeoSPARQL simple features functions
//!   (http://www.opengis.net/def/function/geosparql/)

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}

/// GeoSPARQL ontology constants
pub mod geo {
    /// GeoSPARQL ontology namespace IRI
    pub const NS: &str = "http://www.opengis.net/ont/geosparql#";

    /// geo:wktLiteral - datatype of Well-Known-Text geometry literals
    pub const WKT_LITERAL: &str = "http://www.opengis.net/ont/geosparql#wktLiteral";

    /// geo:asWKT - predicate linking a geometry to its WKT serialization
    pub const AS_WKT: &str = "http://www.opengis.net/ont/geosparql#asWKT";
}

/// GeoSPARQL simple features function IRIs
///
/// One per DE-9IM named predicate.
pub mod geof {
    /// GeoSPARQL function namespace IRI
    pub const NS: &str = "http://www.opengis.net/def/function/geosparql/";

    pub const SF_EQUALS: &str = "http://www.opengis.net/def/function/geosparql/sfEquals";
    pub const SF_DISJOINT: &str = "http://www.opengis.net/def/function/geosparql/sfDisjoint";
    pub const SF_INTERSECTS: &str = "http://www.opengis.net/def/function/geosparql/sfIntersects";
    pub const SF_TOUCHES: &str = "http://www.opengis.net/def/function/geosparql/sfTouches";
    pub const SF_CROSSES: &str = "http://www.opengis.net/def/function/geosparql/sfCrosses";
    pub const SF_WITHIN: &str = "http://www.opengis.net/def/function/geosparql/sfWithin";
    pub const SF_CONTAINS: &str = "http://www.opengis.net/def/function/geosparql/sfContains";
    pub const SF_OVERLAPS: &str = "http://www.opengis.net/def/function/geosparql/sfOverlaps";
}

/// Coordinate reference systems
pub mod crs {
    /// EPSG:4326 (WGS 84 lon/lat) spatial reference id
    pub const EPSG_4326: u32 = 4326;
}
