//! Benchmarks for statement interpolation.

#![allow(missing_docs, clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rdo_sql::{StandardQuoter, count_markers, interpolate};
use rdo_types::Param;

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    let simple = "SELECT * FROM users WHERE id = ? AND name = ?";
    let params = vec![Param::from(42i64), Param::text("O'Brien")];
    group.throughput(Throughput::Bytes(simple.len() as u64));
    group.bench_function("simple", |b| {
        b.iter(|| interpolate(black_box(simple), black_box(&params), &StandardQuoter).unwrap());
    });

    let values = (0..100).map(|_| "(?, ?, ?)").collect::<Vec<_>>().join(", ");
    let bulk = format!("/* bulk */ INSERT INTO t (a, b, c) VALUES {values} -- done?");
    let bulk_params: Vec<Param> = (0..100i64)
        .flat_map(|i| [Param::from(i), Param::text(format!("row {i}")), Param::Null])
        .collect();
    group.throughput(Throughput::Bytes(bulk.len() as u64));
    group.bench_function("bulk_insert_300", |b| {
        b.iter(|| interpolate(black_box(&bulk), black_box(&bulk_params), &StandardQuoter).unwrap());
    });

    group.bench_function("count_markers", |b| {
        b.iter(|| count_markers(black_box(&bulk)));
    });

    group.finish();
}

criterion_group!(benches, bench_interpolate);
criterion_main!(benches);
