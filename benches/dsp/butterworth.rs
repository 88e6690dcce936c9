//! Benchmarks for the Butterworth sections and the three-way band split.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wander_dsp::dsp::band::{Band, BandSplit};
use wander_dsp::dsp::butterworth::Butterworth;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_butterworth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/butterworth");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        for &order in &[2usize, 8, 16] {
            let mut filter = Butterworth::lowpass(48_000.0, 1_000.0, order);
            group.bench_with_input(
                BenchmarkId::new(format!("lowpass_order{}", order), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for &x in &input {
                            black_box(filter.process(black_box(x)));
                        }
                    })
                },
            );
        }

        // Both trackers on different bands: two filters run per sample
        let mut split = BandSplit::new(48_000.0, 200.0, 4_000.0, 8);
        group.bench_with_input(BenchmarkId::new("split_two_bands", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(split.process(black_box(x), [Some(Band::Low), Some(Band::High)]));
                }
            })
        });

        // Random sources: nothing filtered
        let mut split = BandSplit::new(48_000.0, 200.0, 4_000.0, 8);
        group.bench_with_input(BenchmarkId::new("split_idle", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(split.process(black_box(x), [None, None]));
                }
            })
        });
    }

    group.finish();
}
