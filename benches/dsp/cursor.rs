//! Benchmarks for cursor integration, with and without wall hits.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wander_dsp::dsp::cursor::CursorState;

use crate::BLOCK_SIZES;

pub fn bench_cursor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/cursor");

    for &size in BLOCK_SIZES {
        // Free flight in the middle of the square
        let mut cursor = CursorState::new(0.5, 0.5, 0.3);
        group.bench_with_input(BenchmarkId::new("drift", size), &size, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(cursor.step(black_box(0.1), black_box(0.2), 48_000.0));
                }
                cursor.set_position(0.5, 0.5);
            })
        });

        // Pinned in a corner at full speed: reflects every sample
        let mut cursor = CursorState::new(1.0, 1.0, 0.7);
        group.bench_with_input(BenchmarkId::new("corner", size), &size, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(cursor.step(black_box(1.0), black_box(1.0), 48_000.0));
                }
                cursor.rewrap();
            })
        });
    }

    group.finish();
}
