//! Statistics reducer benchmark
//!
//! Measures the cost of reducing a command's samples into a `Summary`,
//! which runs once per command after its timed runs finish.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench summarize
//! ```

use cmdbench::stats::{anderson_darling, half_sample_mode, summarize};
use cmdbench::{Sample, SampleStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Deterministic pseudo-random CPU times around 5ms
fn bench_values(n: usize) -> Vec<i64> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            5_000 + (state % 1_000) as i64
        })
        .collect()
}

fn bench_store(n: usize) -> SampleStore {
    let mut store = SampleStore::new();
    for user in bench_values(n) {
        store.push(Sample {
            command: "bench".to_string(),
            user_us: user,
            system_us: user / 4,
            wall_us: user + user / 2,
            maxrss_bytes: 8 << 20,
            vcsw: 2,
            icsw: user % 13,
            ..Default::default()
        });
    }
    store
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    for n in [10, 100, 1_000, 10_000] {
        let store = bench_store(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &store, |b, store| {
            b.iter(|| summarize(black_box(store), &mut 0));
        });
    }
    group.finish();
}

fn bench_estimators(c: &mut Criterion) {
    let mut values = bench_values(10_000);
    values.sort_unstable();

    c.bench_function("half_sample_mode_10k", |b| {
        b.iter(|| half_sample_mode(black_box(&values)));
    });
    c.bench_function("anderson_darling_10k", |b| {
        b.iter(|| anderson_darling(black_box(&values)));
    });
}

criterion_group!(benches, bench_summarize, bench_estimators);
criterion_main!(benches);
