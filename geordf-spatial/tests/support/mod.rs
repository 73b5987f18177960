//! Shared harness for geordf-spatial integration tests.

// Not every test crate uses every helper.
#![allow(dead_code)]

use geordf_graph_ir::{Resource, Statement, Term};
use geordf_spatial::{parse_wkt, GeoIndexConfig, GeoIndexer, MemoryBackend, ResultDecoder};
use geordf_vocab::geo;
use geo_types::Geometry;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

// =============================================================================
// Fixture
// =============================================================================

pub const FIXTURE_NS: &str = "urn:fixture:";

/// Six named geometries: `A` and the shapes arranged around it.
pub const FIXTURE: [(&str, &str); 6] = [
    ("A", "POLYGON((0 1, 4 1, 4 5, 0 5, 0 1))"),
    ("B", "POLYGON((0 1, 2 1, 2 3, 0 3, 0 1))"),
    ("C", "POLYGON((4 3, 6 3, 6 5, 4 5, 4 3))"),
    ("D", "POLYGON((3 0, 5 0, 5 2, 3 2, 3 0))"),
    ("F", "POINT(2 4)"),
    ("E", "LINESTRING(2 0, 3 3)"),
];

pub fn fixture_wkt(name: &str) -> &'static str {
    FIXTURE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, wkt)| *wkt)
        .unwrap_or_else(|| panic!("no fixture geometry named {name}"))
}

pub fn fixture_geometry(name: &str) -> Geometry<f64> {
    parse_wkt(fixture_wkt(name)).unwrap()
}

pub fn wkt_statement(subject: &str, wkt: &str) -> Statement {
    Statement::new(Resource::iri(subject), geo::AS_WKT, Term::wkt(wkt))
}

pub fn fixture_statements() -> Vec<Statement> {
    FIXTURE
        .iter()
        .map(|(name, wkt)| wkt_statement(&format!("{FIXTURE_NS}{name}"), wkt))
        .collect()
}

/// Mock index loaded with the fixture.
pub fn fixture_index() -> GeoIndexer<MemoryBackend> {
    let mut index = GeoIndexer::open(GeoIndexConfig::mock("fixture")).unwrap();
    let report = index.store_batch(&fixture_statements()).unwrap();
    assert_eq!(report.feature_ids.len(), FIXTURE.len());
    index
}

/// Drain a result sequence into sorted fixture names.
pub fn names(results: ResultDecoder<MemoryBackend>) -> Vec<String> {
    let mut names: Vec<String> = results
        .map(|st| {
            let st = st.unwrap();
            let iri = st.subject.as_iri().unwrap().to_string();
            iri.strip_prefix(FIXTURE_NS).unwrap_or(&iri).to_string()
        })
        .collect();
    names.sort();
    names
}

pub fn sorted(names: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    names.sort();
    names
}

// =============================================================================
// Event capture
// =============================================================================

/// A recorded log event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct EventStore(Arc<Mutex<Vec<CapturedEvent>>>);

impl EventStore {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }

    /// Events at `level` whose message contains `needle`.
    pub fn count(&self, level: tracing::Level, needle: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level && e.message.contains(needle))
            .count()
    }
}

struct EventCaptureLayer {
    store: EventStore,
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for EventCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.store.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

/// Capture events for the lifetime of the returned guard.
pub fn init_event_capture() -> (EventStore, tracing::subscriber::DefaultGuard) {
    let store = EventStore::default();
    let layer = EventCaptureLayer {
        store: store.clone(),
    };
    let subscriber = tracing_subscriber::registry::Registry::default().with(layer);
    let guard = tracing::subscriber::set_default(subscriber);
    (store, guard)
}
