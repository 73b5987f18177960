//! Backend boundary.
//!
//! The physical spatial index lives outside this crate. [`GeoBackend`] is
//! the seam: schema creation, feature writes keyed by the provided id, and
//! filtered reads returning a [`FeatureCursor`]. Backend methods take
//! `&self` and use interior mutability, so a backend can be shared through
//! an `Arc` between the facade and the result sequences it hands out.
//!
//! [`MemoryBackend`] is the in-process implementation selected by the mock
//! flag of [`GeoIndexConfig`]. It scans every stored feature, applies a
//! bbox prefilter, then evaluates the exact DE-9IM predicate.

use crate::config::GeoIndexConfig;
use crate::error::{GeoIndexError, Result};
use crate::feature::{Feature, FeatureType};
use crate::geometry::BBox;
use crate::query::FilterExpr;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Forward-only cursor over the features matching a filter.
pub trait FeatureCursor {
    /// Next matching feature, or `None` when drained.
    fn next_feature(&mut self) -> Result<Option<Feature>>;

    /// Release the cursor. Must be idempotent.
    fn close(&mut self) -> Result<()>;
}

/// Storage engine holding statement features.
pub trait GeoBackend {
    type Cursor: FeatureCursor;

    /// Create the schema if it does not exist. Returns `true` if created.
    fn ensure_schema(&self, feature_type: &FeatureType) -> Result<bool>;

    /// Write features, keyed by their provided ids. All or nothing.
    fn write_features(&self, feature_type: &FeatureType, features: Vec<Feature>) -> Result<()>;

    /// Open a cursor over the features matching `filter`.
    fn read_features(&self, feature_type: &FeatureType, filter: &FilterExpr)
        -> Result<Self::Cursor>;

    /// Make buffered writes durable.
    fn flush(&self) -> Result<()>;

    /// Release backend resources. Must be idempotent.
    fn close(&self) -> Result<()>;
}

/// Operation counters for a [`MemoryBackend`].
#[derive(Debug, Default)]
pub struct BackendStats {
    writes: AtomicU64,
    reads: AtomicU64,
    open_cursors: AtomicUsize,
}

impl BackendStats {
    /// Number of `write_features` calls that committed.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Number of `read_features` calls that opened a cursor.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Cursors opened and not yet released.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default)]
struct MemoryStore {
    /// Feature type name → (feature id → feature). BTreeMap keeps scans in
    /// id order.
    tables: FxHashMap<&'static str, BTreeMap<String, Feature>>,
    closed: bool,
    fail_writes: Option<String>,
}

/// In-memory backend.
pub struct MemoryBackend {
    table_name: String,
    store: RwLock<MemoryStore>,
    stats: Arc<BackendStats>,
}

impl MemoryBackend {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            store: RwLock::new(MemoryStore::default()),
            stats: Arc::new(BackendStats::default()),
        }
    }

    /// Create a backend from configuration.
    ///
    /// Only the mock configuration can be served in-process; a live
    /// configuration is refused.
    pub fn connect(config: &GeoIndexConfig) -> Result<Self> {
        config.validate()?;
        if !config.use_mock {
            return Err(GeoIndexError::config(format!(
                "no live backend is linked for table '{}'; enable the mock instance",
                config.table_name
            )));
        }
        tracing::debug!(
            table = %config.table_name,
            partitions = config.num_partitions,
            "Connecting in-memory geo backend"
        );
        Ok(Self::new(config.table_name.clone()))
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn stats(&self) -> &BackendStats {
        &self.stats
    }

    /// Number of features stored under `feature_type`.
    pub fn feature_count(&self, feature_type: &FeatureType) -> usize {
        self.store
            .read()
            .tables
            .get(feature_type.name)
            .map_or(0, BTreeMap::len)
    }

    /// Make subsequent writes fail with `reason` (`None` restores writes).
    pub fn set_write_failure(&self, reason: Option<String>) {
        self.store.write().fail_writes = reason;
    }

    fn check_open(store: &MemoryStore) -> Result<()> {
        if store.closed {
            return Err(GeoIndexError::backend("backend is closed"));
        }
        Ok(())
    }
}

impl GeoBackend for MemoryBackend {
    type Cursor = MemoryCursor;

    fn ensure_schema(&self, feature_type: &FeatureType) -> Result<bool> {
        let mut store = self.store.write();
        Self::check_open(&store)?;
        if store.tables.contains_key(feature_type.name) {
            return Ok(false);
        }
        store.tables.insert(feature_type.name, BTreeMap::new());
        tracing::info!(
            table = %self.table_name,
            feature_type = feature_type.name,
            schema = %feature_type.schema_spec(),
            "Created feature schema"
        );
        Ok(true)
    }

    fn write_features(&self, feature_type: &FeatureType, features: Vec<Feature>) -> Result<()> {
        let mut store = self.store.write();
        Self::check_open(&store)?;
        if let Some(reason) = &store.fail_writes {
            return Err(GeoIndexError::backend(reason.clone()));
        }
        let table = store.tables.get_mut(feature_type.name).ok_or_else(|| {
            GeoIndexError::backend(format!("unknown feature type: {}", feature_type.name))
        })?;
        for feature in features {
            table.insert(feature.id.clone(), feature);
        }
        self.stats.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn read_features(&self, feature_type: &FeatureType, filter: &FilterExpr) -> Result<MemoryCursor> {
        let store = self.store.read();
        Self::check_open(&store)?;
        let table = store.tables.get(feature_type.name).ok_or_else(|| {
            GeoIndexError::backend(format!("unknown feature type: {}", feature_type.name))
        })?;

        let query_bbox = if filter.op.requires_intersection() {
            BBox::from_geometry(&filter.geometry)
        } else {
            None
        };

        let mut matches = Vec::new();
        for feature in table.values() {
            // Bbox prefilter
            if let Some(query_bbox) = &query_bbox {
                match BBox::from_geometry(&feature.geometry) {
                    Some(bbox) if query_bbox.intersects(&bbox) => {}
                    _ => continue,
                }
            }
            if filter.matches(&feature.geometry) {
                matches.push(feature.clone());
            }
        }

        self.stats.reads.fetch_add(1, Ordering::Relaxed);
        self.stats.open_cursors.fetch_add(1, Ordering::Relaxed);
        Ok(MemoryCursor {
            features: matches.into_iter(),
            stats: Some(Arc::clone(&self.stats)),
        })
    }

    fn flush(&self) -> Result<()> {
        Self::check_open(&self.store.read())
    }

    fn close(&self) -> Result<()> {
        self.store.write().closed = true;
        Ok(())
    }
}

/// Cursor over a snapshot of matching features.
pub struct MemoryCursor {
    features: std::vec::IntoIter<Feature>,
    /// Present while the cursor is open.
    stats: Option<Arc<BackendStats>>,
}

impl FeatureCursor for MemoryCursor {
    fn next_feature(&mut self) -> Result<Option<Feature>> {
        if self.stats.is_none() {
            return Err(GeoIndexError::backend("cursor is closed"));
        }
        Ok(self.features.next())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stats) = self.stats.take() {
            stats.open_cursors.fetch_sub(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureMapper, MapResult};
    use crate::geometry::parse_wkt;
    use crate::query::{translate, SpatialOp};
    use geordf_graph_ir::{Resource, Statement, Term};
    use geordf_vocab::geo;

    fn feature(subject: &str, wkt: &str) -> Feature {
        let st = Statement::new(Resource::iri(subject), geo::AS_WKT, Term::wkt(wkt));
        match FeatureMapper::default().map(&st) {
            MapResult::Mapped(f) => f,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn backend() -> (MemoryBackend, FeatureType) {
        let backend = MemoryBackend::new("test");
        let ft = FeatureType::statements();
        assert!(backend.ensure_schema(&ft).unwrap());
        assert!(!backend.ensure_schema(&ft).unwrap());
        (backend, ft)
    }

    #[test]
    fn test_writes_overwrite_by_id() {
        let (backend, ft) = backend();
        let f = feature("urn:a", "POINT(1 1)");
        backend.write_features(&ft, vec![f.clone()]).unwrap();
        backend.write_features(&ft, vec![f]).unwrap();
        assert_eq!(backend.feature_count(&ft), 1);
        assert_eq!(backend.stats().writes(), 2);
    }

    #[test]
    fn test_read_and_release_cursor() {
        let (backend, ft) = backend();
        backend
            .write_features(
                &ft,
                vec![feature("urn:a", "POINT(1 1)"), feature("urn:b", "POINT(9 9)")],
            )
            .unwrap();

        let query = parse_wkt("POLYGON((0 0, 2 0, 2 2, 0 2, 0 0))").unwrap();
        let mut cursor = backend
            .read_features(&ft, &translate(SpatialOp::Within, &query))
            .unwrap();
        assert_eq!(backend.stats().open_cursors(), 1);

        let first = cursor.next_feature().unwrap().unwrap();
        assert_eq!(first.subject, "urn:a");
        assert!(cursor.next_feature().unwrap().is_none());

        cursor.close().unwrap();
        cursor.close().unwrap();
        assert_eq!(backend.stats().open_cursors(), 0);
        assert!(cursor.next_feature().is_err());
    }

    #[test]
    fn test_disjoint_skips_bbox_prefilter() {
        let (backend, ft) = backend();
        backend
            .write_features(&ft, vec![feature("urn:far", "POINT(50 50)")])
            .unwrap();
        let query = parse_wkt("POINT(0 0)").unwrap();
        let mut cursor = backend
            .read_features(&ft, &translate(SpatialOp::Disjoint, &query))
            .unwrap();
        assert!(cursor.next_feature().unwrap().is_some());
        cursor.close().unwrap();
    }

    #[test]
    fn test_write_failure_and_close() {
        let (backend, ft) = backend();
        backend.set_write_failure(Some("disk full".into()));
        let err = backend
            .write_features(&ft, vec![feature("urn:a", "POINT(1 1)")])
            .unwrap_err();
        assert!(matches!(err, GeoIndexError::Backend(msg) if msg == "disk full"));
        assert_eq!(backend.feature_count(&ft), 0);

        backend.close().unwrap();
        backend.close().unwrap();
        assert!(backend.flush().is_err());
    }

    #[test]
    fn test_connect_requires_mock() {
        let live = GeoIndexConfig::new("t");
        assert!(matches!(
            MemoryBackend::connect(&live),
            Err(GeoIndexError::Config(_))
        ));
        let backend = MemoryBackend::connect(&GeoIndexConfig::mock("t")).unwrap();
        assert_eq!(backend.table_name(), "t");
    }
}
