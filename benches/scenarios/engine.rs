//! Whole blocks through the engine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wander_dsp::params::{self, ControllerVector};
use wander_dsp::{DriveRegion, Engine, EngineConfig, LevelPolicy, NoEvents, Passthrough, WrappedEffect};

use crate::{test_signal, BLOCK_SIZES};

fn engine<E: WrappedEffect>(policy: LevelPolicy, speed_type: f32, spin_type: f32, effect: E) -> Engine<E> {
    let config = EngineConfig::default().seed(1).level_policy(policy);
    let mut engine = match Engine::new(config, effect) {
        Ok(engine) => engine,
        Err(err) => panic!("bench engine: {}", err),
    };
    let mut controllers = ControllerVector::factory();
    controllers.set(params::SPEED_TYPE, speed_type);
    controllers.set(params::SPIN_TYPE, spin_type);
    engine.set_controllers(&controllers.values()[..]);
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let left = test_signal(size);
        let right: Vec<f32> = left.iter().map(|x| -0.5 * x).collect();
        let mut out_l = vec![0.0f32; size];
        let mut out_r = vec![0.0f32; size];

        // Random walk only: the cheapest autonomous path
        let mut random = engine(LevelPolicy::DbReferenced, 0.0, 0.0, Passthrough);
        group.bench_with_input(BenchmarkId::new("random_passthrough", size), &size, |b, _| {
            b.iter(|| {
                black_box(random.process_block(
                    [black_box(left.as_slice()), black_box(right.as_slice())],
                    [&mut out_l, &mut out_r],
                    &mut NoEvents,
                ))
            })
        });

        // Lows drive speed, highs drive spin, with the drive effect
        let mut bands = engine(LevelPolicy::DbReferenced, 2.0, 4.0, DriveRegion::new(48_000.0));
        group.bench_with_input(BenchmarkId::new("bands_drive", size), &size, |b, _| {
            b.iter(|| {
                black_box(bands.process_block(
                    [black_box(left.as_slice()), black_box(right.as_slice())],
                    [&mut out_l, &mut out_r],
                    &mut NoEvents,
                ))
            })
        });

        let mut peak = engine(LevelPolicy::PeakNormalized, 3.0, 1.0, DriveRegion::new(48_000.0));
        group.bench_with_input(BenchmarkId::new("peak_drive", size), &size, |b, _| {
            b.iter(|| {
                black_box(peak.process_block(
                    [black_box(left.as_slice()), black_box(right.as_slice())],
                    [&mut out_l, &mut out_r],
                    &mut NoEvents,
                ))
            })
        });
    }

    group.finish();
}
