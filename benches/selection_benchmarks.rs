//! Benchmarks for the selection hot paths: a full `select` call over
//! synthetic pools of increasing size, and the coverage objective itself.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use isos::{
    BoundingBox, Selection, SelectionEngine, SpatialObject, VisitorIndex, coverage_score,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_engine(n: usize, seed: u64) -> SelectionEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut objects = Vec::with_capacity(n);
    let mut visitors = VisitorIndex::new();

    for id in 0..n as u64 {
        let lat = rng.random_range(4.0..10.0);
        let lon = rng.random_range(2.0..10.0);

        let n_visitors = rng.random_range(5..10);
        let visitor_set: Vec<u64> = (0..n_visitors)
            .map(|_| rng.random_range(101..151))
            .collect();

        let weight = SpatialObject::weight_from_visitor_count(visitor_set.len());
        objects.push(SpatialObject::new(id, lat, lon, weight).unwrap());
        visitors.insert(id, visitor_set);
    }

    SelectionEngine::new(objects, visitors).unwrap()
}

fn benchmark_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    group.sample_size(20);

    for &n in &[100, 500, 2000] {
        let engine = synthetic_engine(n, 42);
        let wide = BoundingBox::new((0.0, 0.0), (12.0, 12.0)).unwrap();
        let bounds = BoundingBox::new((3.0, 1.0), (11.0, 11.0)).unwrap();

        group.bench_with_input(BenchmarkId::new("cold_pan", n), &n, |b, _| {
            b.iter(|| {
                engine
                    .select(
                        black_box(&wide),
                        black_box(&bounds),
                        black_box(10),
                        &Selection::empty(),
                    )
                    .unwrap()
            })
        });

        // Warm zoom-in: previous selection seeds the next call.
        let previous = engine.select(&wide, &bounds, 10, &Selection::empty()).unwrap();
        let narrow = BoundingBox::new((4.0, 2.0), (10.0, 10.0)).unwrap();
        group.bench_with_input(BenchmarkId::new("warm_zoom_in", n), &n, |b, _| {
            b.iter(|| {
                engine
                    .select(
                        black_box(&bounds),
                        black_box(&narrow),
                        black_box(10),
                        black_box(&previous),
                    )
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn benchmark_coverage_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage_score");

    for &n in &[100, 500, 2000] {
        let engine = synthetic_engine(n, 7);
        let pool = engine.objects().to_vec();
        let selected: Vec<u64> = pool.iter().take(10).map(|o| o.id).collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                coverage_score(
                    black_box(&pool),
                    black_box(engine.visitors()),
                    black_box(&selected),
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_select, benchmark_coverage_score);
criterion_main!(benches);
