//! Benchmarks for the two level-follower policies.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wander_dsp::dsp::level::{DbLevel, LevelFollower, PeakLevel};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/level");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        // log10 per sample
        let mut db = DbLevel::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("db_referenced", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(db.next_sample(black_box(x)));
                }
            })
        });

        // one divide per sample
        let mut peak = PeakLevel::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("peak_normalized", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(peak.next_sample(black_box(x)));
                }
            })
        });
    }

    group.finish();
}
