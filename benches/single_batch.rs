//! Criterion benchmarks for batch validation against the bundled catalog.
//!
//! Run with: cargo bench --bench single_batch

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use placement_engine::{
    bundled_catalog, validate_combination, CombinationValidator, PlantEntry, SystemSnapshot,
    ValidationRequest,
};

fn sample_system() -> SystemSnapshot {
    SystemSnapshot::with_counts(40, &[("lettuce", 4), ("spinach", 3), ("basil", 2)])
}

fn sample_entries() -> Vec<PlantEntry> {
    vec![
        PlantEntry::new("tomato", 2),
        PlantEntry::new("chives", 3),
        PlantEntry::new("strawberry", 2),
        PlantEntry::new("arugula", 1),
    ]
}

fn bench_single_batch(c: &mut Criterion) {
    let catalog = bundled_catalog().unwrap();
    let system = sample_system();
    let entries = sample_entries();

    let mut group = c.benchmark_group("single_batch");

    group.bench_function("validate_combination", |b| {
        b.iter(|| {
            black_box(validate_combination(
                black_box(&entries),
                system.capacity,
                &system.placed_plants,
                &catalog,
            ))
        });
    });

    let validator = CombinationValidator::new(Arc::new(catalog));
    group.bench_function("report", |b| {
        b.iter(|| black_box(validator.report(black_box(&system), black_box(&entries))));
    });

    group.finish();
}

fn bench_validate_many(c: &mut Criterion) {
    let validator = CombinationValidator::new(Arc::new(bundled_catalog().unwrap()));
    let requests: Vec<ValidationRequest> = (0..1_000)
        .map(|i| ValidationRequest {
            system: SystemSnapshot::with_counts(20 + (i % 20), &[("lettuce", i % 5)]),
            entries: sample_entries(),
        })
        .collect();

    c.bench_function("validate_many_1000", |b| {
        b.iter(|| black_box(validator.validate_many(black_box(&requests))));
    });
}

criterion_group!(benches, bench_single_batch, bench_validate_many);
criterion_main!(benches);
