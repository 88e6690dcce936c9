//! Benchmarks for bilinear corner interpolation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wander_dsp::dsp::grid::interpolate;
use wander_dsp::params::{FxGrid, NR_FX, NR_PARAMS};

use crate::BLOCK_SIZES;

pub fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/grid");

    let mut grid: FxGrid = [[0.0; NR_PARAMS]; NR_FX];
    for (corner, preset) in grid.iter_mut().enumerate() {
        for (param, value) in preset.iter_mut().enumerate() {
            *value = ((corner * NR_PARAMS + param) as f32 * 0.31).fract();
        }
    }

    for &size in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::new("interpolate", size), &size, |b, &n| {
            b.iter(|| {
                for i in 0..n {
                    let x = i as f32 / n as f32;
                    black_box(interpolate(black_box(&grid), x, 1.0 - x));
                }
            })
        });
    }

    group.finish();
}
