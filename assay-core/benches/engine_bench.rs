//! Benchmarks for the single-pass validation engine.

use assay_core::core::{Expectation, ExpectationSuite, ExpectedType, Value};
use assay_core::engine::ValidationEngine;
use assay_core::sources::MemorySource;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn fixture_source(rows: usize) -> MemorySource {
    let mut builder = MemorySource::builder("bench")
        .columns(["player_id", "player_name", "points", "game_date", "minutes_played"]);
    for i in 0..rows {
        // every 97th row carries a defect so failure bookkeeping is exercised
        let minutes = if i % 97 == 0 { 999 } else { 30 + (i % 12) as i64 };
        builder = builder.row([
            Value::from(i as i64),
            Value::from(format!("Player {i}")),
            Value::from((i % 50) as i64),
            Value::from("2024-01-15"),
            Value::from(minutes),
        ]);
    }
    builder.build().unwrap()
}

fn fixture_suite() -> ExpectationSuite {
    ExpectationSuite::builder("bench_suite")
        .expect(Expectation::column_exists("player_id"))
        .expect(Expectation::values_not_null("player_name"))
        .expect(Expectation::values_of_type("player_id", ExpectedType::Integer))
        .expect(Expectation::values_between("points", 0.0, 100.0).unwrap())
        .expect(Expectation::values_between("minutes_played", 0.0, 48.0).unwrap())
        .expect(Expectation::values_match_format("game_date", "YYYY-MM-DD").unwrap())
        .build()
        .unwrap()
}

fn bench_validate(c: &mut Criterion) {
    let suite = fixture_suite();
    let engine = ValidationEngine::new();

    let mut group = c.benchmark_group("validate");
    for rows in [1_000usize, 10_000, 50_000] {
        let source = fixture_source(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &source, |b, source| {
            b.iter(|| engine.validate(black_box(&suite), black_box(source)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
