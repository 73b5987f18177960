//! Geometry index benchmarks.
//!
//! Measures:
//! - Statement wire encode/decode
//! - Statement → feature mapping (WKT parse + feature id)
//! - Query latency against the in-memory backend

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geordf_graph_ir::{codec, Resource, Statement, Term};
use geordf_spatial::{parse_wkt, FeatureMapper, GeoIndexConfig, GeoIndexer};
use geordf_vocab::geo;

// ============================================================================
// Test Data Generation
// ============================================================================

/// Square polygon centered on (x, y).
fn square(x: f64, y: f64, size: f64) -> String {
    let h = size / 2.0;
    format!(
        "POLYGON(({} {}, {} {}, {} {}, {} {}, {} {}))",
        x - h,
        y - h,
        x + h,
        y - h,
        x + h,
        y + h,
        x - h,
        y + h,
        x - h,
        y - h,
    )
}

/// Statements on a grid, alternating points and squares.
fn generate_statements(count: usize) -> Vec<Statement> {
    let side = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let x = (i % side) as f64;
            let y = (i / side) as f64;
            let wkt = if i % 2 == 0 {
                format!("POINT({} {})", x, y)
            } else {
                square(x, y, 0.8)
            };
            Statement::new(
                Resource::iri(format!("http://example.org/place/{}", i)),
                geo::AS_WKT,
                Term::wkt(wkt),
            )
            .with_context("http://example.org/graph/places")
        })
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let statements = generate_statements(1_000);
    let encoded: Vec<String> = statements.iter().map(codec::encode).collect();

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(statements.len() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| {
            for st in &statements {
                black_box(codec::encode(st));
            }
        })
    });
    group.bench_function("decode", |b| {
        b.iter(|| {
            for wire in &encoded {
                black_box(codec::decode(wire).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_map_all(c: &mut Criterion) {
    let mapper = FeatureMapper::default();
    let mut group = c.benchmark_group("map_all");

    for count in [100, 1_000] {
        let statements = generate_statements(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &statements, |b, sts| {
            b.iter(|| black_box(mapper.map_all(sts).accepted.len()))
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut index = GeoIndexer::open(GeoIndexConfig::mock("bench")).unwrap();
    index.store_batch(&generate_statements(2_500)).unwrap();

    let window = parse_wkt(&square(25.0, 25.0, 10.0)).unwrap();
    let mut group = c.benchmark_group("query");
    group.bench_function("intersects", |b| {
        b.iter(|| black_box(index.query_intersects(&window).unwrap().count()))
    });
    group.bench_function("within", |b| {
        b.iter(|| black_box(index.query_within(&window).unwrap().count()))
    });
    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_codec, bench_map_all, bench_queries);

criterion_main!(benches);
