//! Benchmarks for the reference drive effect, re-parameterised every sample
//! the way the engine drives it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wander_dsp::params::NR_PARAMS;
use wander_dsp::{DriveRegion, StereoFrame, WrappedEffect};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_effect(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/effect");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut fx = DriveRegion::new(48_000.0);

        group.bench_with_input(BenchmarkId::new("drive_region", size), &size, |b, _| {
            b.iter(|| {
                for (i, &x) in input.iter().enumerate() {
                    let sweep = i as f32 / input.len() as f32;
                    let params: [f32; NR_PARAMS] = [0.7, 0.2 + 0.3 * sweep, 0.8, sweep, 1.0, 0.0];
                    fx.set_parameters(&params);
                    black_box(fx.process(StereoFrame::new(black_box(x), black_box(-x))));
                }
            })
        });
    }

    group.finish();
}
