//! Benchmarks for distance and proximity ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mallorca_geo::{distance_km, find_nearby, Coordinate, ProximityQuery, MALLORCA_BOUNDS};

fn create_test_points(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            // Grid spread over the island's bounding box
            let lat = MALLORCA_BOUNDS.min_lat + (i as f64 * 0.013) % 0.8;
            let lon = MALLORCA_BOUNDS.min_lon + (i as f64 * 0.017) % 1.3;
            Coordinate::new(lat, lon)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let alcudia = Coordinate::new(39.8353, 3.1190);
    let palma = Coordinate::new(39.5198, 2.7458);

    c.bench_function("distance_km_single", |b| {
        b.iter(|| distance_km(black_box(&alcudia), black_box(&palma)))
    });
}

fn bench_find_nearby(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearby");
    let reference = MALLORCA_BOUNDS.center();

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_test_points(*size);
        let query = ProximityQuery::new(reference).with_radius(25.0).with_max_results(10);

        group.bench_with_input(BenchmarkId::new("radius_25km_top10", size), size, |b, _| {
            b.iter(|| find_nearby(black_box(&query), black_box(&points)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_find_nearby);
criterion_main!(benches);
