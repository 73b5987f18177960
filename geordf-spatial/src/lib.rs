//! Geometry indexing for RDF statements.
//!
//! Statements whose object is a WKT literal are stored as features in a
//! spatial backend and retrieved with the eight DE-9IM named predicates.
//!
//! # Architecture
//!
//! ```text
//!   Statement ──▶ PredicateFilter ──▶ extract_geometry ──▶ FeatureMapper
//!                                                              │
//!                                                              ▼
//!                         GeoIndexer ─── write_features ──▶ GeoBackend
//!                             │                                 ▲
//!                             ▼                                 │
//!                  translate(op, geometry) ── read_features ────┘
//!                             │
//!                             ▼
//!                  ResultDecoder (lazy cursor) ──▶ Statement
//! ```
//!
//! # Modules
//!
//! - [`config`]: Index configuration and property keys
//! - [`geometry`]: WKT parsing and geometry extraction from literals
//! - [`filter`]: Predicate allow-list
//! - [`feature`]: Feature schema, ids, and statement → feature mapping
//! - [`query`]: DE-9IM operations and filter expressions
//! - [`provider`]: Backend traits and the in-memory backend
//! - [`decoder`]: Lazy query result sequence
//! - [`indexer`]: The index facade
//! - [`error`]: Error types

pub mod config;
pub mod decoder;
pub mod error;
pub mod feature;
pub mod filter;
pub mod geometry;
pub mod indexer;
pub mod provider;
pub mod query;

// Re-export key types
pub use config::{ConnectionConfig, GeoIndexConfig};
pub use decoder::ResultDecoder;
pub use error::{GeoIndexError, GeometryParseError, Result};
pub use feature::{feature_id, Feature, FeatureMapper, FeatureType, MapResult, MappingOutcome};
pub use filter::PredicateFilter;
pub use geometry::{extract_geometry, parse_wkt, to_wkt, BBox, ExtractedGeometry};
pub use indexer::{GeoIndexer, StoreReport};
pub use provider::{BackendStats, FeatureCursor, GeoBackend, MemoryBackend, MemoryCursor};
pub use query::{translate, FilterExpr, SpatialOp};
