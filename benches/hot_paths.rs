use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use natural_events_map::{
    aggregate, classify, merge_nearby, normalize, Event, PointSet, Sample, SizeScale, Thresholds,
};

/// Deterministic pseudo-random sequence in [0, 1)
fn jitter(i: usize, salt: u64) -> f64 {
    let mut x = (i as u64 ^ salt).wrapping_mul(0x9e3779b97f4a7c15);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

fn world_points(n: usize) -> PointSet {
    (0..n)
        .map(|i| {
            (
                jitter(i, 1) * 360.0 - 180.0,
                jitter(i, 2) * 170.0 - 85.0,
                20.0 + jitter(i, 3) * 400.0,
            )
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let values: Vec<Option<f64>> = (0..10_000)
        .map(|i| (i % 7 != 0).then(|| jitter(i, 4) * 100.0))
        .collect();
    let scale = SizeScale::default();

    c.bench_function("normalize_10k", |b| {
        b.iter(|| black_box(normalize(black_box(&values), &scale)))
    });
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_nearby");
    for n in [100, 1_000, 4_000] {
        let points = world_points(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| black_box(merge_nearby(black_box(points), 60.0)))
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let categories = ["wildfires", "severeStorms", "volcanoes", "seaLakeIce"];
    let events: Vec<Event> = (0..500)
        .map(|i| {
            let samples = (0..8)
                .map(|k| {
                    let j = i * 8 + k;
                    Sample::new(
                        jitter(j, 5) * 360.0 - 180.0,
                        jitter(j, 6) * 170.0 - 85.0,
                        Some(jitter(j, 7) * 50.0),
                    )
                })
                .collect();
            Event::new(categories[i % categories.len()], samples)
        })
        .collect();
    let thresholds = Thresholds::default();
    let classified = classify(events, thresholds.max_categories).unwrap();
    let selected = vec![true; classified.len()];

    c.bench_function("aggregate_merged_4k", |b| {
        b.iter(|| black_box(aggregate(&classified, &selected, true, &thresholds)))
    });
}

criterion_group!(benches, bench_normalize, bench_merge, bench_aggregate);
criterion_main!(benches);
