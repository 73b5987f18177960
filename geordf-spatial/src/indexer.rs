//! Geometry index facade.
//!
//! [`GeoIndexer`] stores statements as `RDF` features and answers the eight
//! DE-9IM queries with lazy [`ResultDecoder`]s. It owns the backend
//! lifecycle: the schema is ensured on open, and `close` flushes pending
//! writes before releasing the backend.
//!
//! # Usage
//!
//! ```
//! use geordf_graph_ir::{Resource, Statement, Term};
//! use geordf_spatial::{parse_wkt, GeoIndexConfig, GeoIndexer};
//! use geordf_vocab::geo;
//!
//! let mut index = GeoIndexer::open(GeoIndexConfig::mock("places")).unwrap();
//! index
//!     .store(&Statement::new(
//!         Resource::iri("urn:place:1"),
//!         geo::AS_WKT,
//!         Term::wkt("POINT(2 4)"),
//!     ))
//!     .unwrap();
//!
//! let area = parse_wkt("POLYGON((0 1, 4 1, 4 5, 0 5, 0 1))").unwrap();
//! let hits = index
//!     .query_within(&area)
//!     .unwrap()
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(hits.len(), 1);
//! index.close().unwrap();
//! ```

use crate::config::GeoIndexConfig;
use crate::decoder::ResultDecoder;
use crate::error::{GeoIndexError, GeometryParseError, Result};
use crate::feature::{Feature, FeatureMapper, FeatureType};
use crate::filter::PredicateFilter;
use crate::provider::{GeoBackend, MemoryBackend};
use crate::query::{translate, SpatialOp};
use geo_types::Geometry;
use geordf_graph_ir::Statement;
use std::sync::Arc;

/// What a store call did with its statements.
#[derive(Debug, Clone, Default)]
pub struct StoreReport {
    /// Ids of the features written (or buffered, when write buffering is
    /// enabled).
    pub feature_ids: Vec<String>,
    /// Statements skipped by the predicate filter.
    pub filtered: usize,
    /// Statements whose geometry could not be read.
    pub rejected: Vec<(Statement, GeometryParseError)>,
}

/// Geometry index over a [`GeoBackend`].
pub struct GeoIndexer<B: GeoBackend> {
    backend: Arc<B>,
    feature_type: Arc<FeatureType>,
    mapper: FeatureMapper,
    /// 0 = write-through.
    write_buffer_capacity: usize,
    pending: Vec<Feature>,
    closed: bool,
}

impl GeoIndexer<MemoryBackend> {
    /// Open an index on the backend selected by `config`.
    pub fn open(config: GeoIndexConfig) -> Result<Self> {
        let backend = MemoryBackend::connect(&config)?;
        Self::with_backend(&config, backend)
    }
}

impl<B: GeoBackend> GeoIndexer<B> {
    /// Open an index over an existing backend connection.
    pub fn with_backend(config: &GeoIndexConfig, backend: B) -> Result<Self> {
        Self::with_shared_backend(config, Arc::new(backend))
    }

    /// Open an index over a shared backend handle.
    pub fn with_shared_backend(config: &GeoIndexConfig, backend: Arc<B>) -> Result<Self> {
        config.validate()?;
        let feature_type = Arc::new(FeatureType::statements());
        if backend.ensure_schema(&feature_type)? {
            tracing::debug!(table = %config.table_name, "Feature schema created");
        }

        Ok(Self {
            backend,
            feature_type,
            mapper: FeatureMapper::new(PredicateFilter::new(&config.predicates)),
            write_buffer_capacity: config.write_buffer_capacity,
            pending: Vec::new(),
            closed: false,
        })
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn feature_type(&self) -> &FeatureType {
        &self.feature_type
    }

    /// Predicates eligible for indexing (empty means all).
    pub fn indexable_predicates(&self) -> Vec<&str> {
        self.mapper.filter().predicates().collect()
    }

    /// Features buffered and not yet written.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Store a single statement.
    pub fn store(&mut self, statement: &Statement) -> Result<StoreReport> {
        self.store_batch(std::iter::once(statement))
    }

    /// Store a batch of statements with at most one backend write.
    ///
    /// Statements that are filtered out or carry no readable geometry are
    /// skipped; they never abort the write. If the write fails the whole
    /// batch fails. With buffering enabled, features of a failed commit stay
    /// buffered for the next flush.
    pub fn store_batch<'a, I>(&mut self, statements: I) -> Result<StoreReport>
    where
        I: IntoIterator<Item = &'a Statement>,
    {
        self.ensure_open()?;
        let outcome = self.mapper.map_all(statements);
        for (statement, error) in &outcome.rejected {
            tracing::warn!(
                statement = %statement,
                error = %error,
                "Error getting geo from statement"
            );
        }
        if outcome.filtered > 0 {
            tracing::debug!(filtered = outcome.filtered, "Statements not indexable");
        }

        let feature_ids = outcome.feature_ids();
        if self.write_buffer_capacity > 0 {
            self.pending.extend(outcome.accepted);
            if self.pending.len() >= self.write_buffer_capacity {
                self.commit_pending()?;
            }
        } else if !outcome.accepted.is_empty() {
            self.write(outcome.accepted)?;
        }

        Ok(StoreReport {
            feature_ids,
            filtered: outcome.filtered,
            rejected: outcome.rejected,
        })
    }

    /// Run a topological query.
    pub fn query(&self, op: SpatialOp, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.ensure_open()?;
        let filter = translate(op, geometry);
        Ok(ResultDecoder::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.feature_type),
            filter,
        ))
    }

    /// Run the query named by a GeoSPARQL `geof:sf*` function IRI.
    pub fn query_function(&self, function_iri: &str, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::from_function_iri(function_iri)?, geometry)
    }

    pub fn query_equals(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Equals, geometry)
    }

    pub fn query_disjoint(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Disjoint, geometry)
    }

    pub fn query_intersects(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Intersects, geometry)
    }

    pub fn query_touches(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Touches, geometry)
    }

    pub fn query_crosses(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Crosses, geometry)
    }

    pub fn query_within(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Within, geometry)
    }

    pub fn query_contains(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Contains, geometry)
    }

    pub fn query_overlaps(&self, geometry: &Geometry<f64>) -> Result<ResultDecoder<B>> {
        self.query(SpatialOp::Overlaps, geometry)
    }

    /// Commit buffered features, then flush the backend.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.commit_pending()?;
        self.backend.flush()
    }

    /// Flush and release the backend. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.flush()?;
        self.backend.close()?;
        self.closed = true;
        tracing::info!("Geometry index closed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(GeoIndexError::IndexClosed);
        }
        Ok(())
    }

    /// The buffer is cleared only after a successful write.
    fn commit_pending(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        self.write(self.pending.clone())?;
        self.pending.clear();
        Ok(())
    }

    fn write(&self, features: Vec<Feature>) -> Result<()> {
        let feature_ids: Vec<String> = features.iter().map(|f| f.id.clone()).collect();
        tracing::debug!(count = feature_ids.len(), "Writing features");
        self.backend
            .write_features(&self.feature_type, features)
            .map_err(|e| {
                tracing::error!(count = feature_ids.len(), error = %e, "Feature write failed");
                GeoIndexError::BatchWrite {
                    feature_ids,
                    reason: e.to_string(),
                }
            })
    }
}

impl<B: GeoBackend> Drop for GeoIndexer<B> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "Error closing geometry index on drop");
        }
    }
}
