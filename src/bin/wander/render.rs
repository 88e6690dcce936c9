use std::f32::consts::TAU;
use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;
use wander_dsp::{CursorEvent, DriveRegion, Engine, EngineConfig, TimedEvent, MAX_BLOCK_SIZE};

use crate::MotionArgs;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Length of the rendered file in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Output WAV path
    #[arg(short, long, default_value = "wander.wav")]
    out: PathBuf,

    /// Sample rate of the render
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    #[command(flatten)]
    motion: MotionArgs,
}

/// A slow chord under a pulse of decaying hits, so both the level sources
/// and the band sources have something to follow.
fn test_signal(sample_rate: u32, seconds: f32) -> Vec<f32> {
    let sr = sample_rate as f32;
    let n = (sr * seconds.max(0.0)) as usize;
    let chord = [110.0f32, 164.81, 220.0, 277.18];
    let hit_every = (sr * 0.75) as usize;

    (0..n)
        .map(|i| {
            let t = i as f32 / sr;
            let pad: f32 = chord.iter().map(|f| (TAU * f * t).sin()).sum::<f32>() * 0.08;
            let since_hit = (i % hit_every.max(1)) as f32 / sr;
            let hit = (TAU * 1_800.0 * t).sin() * (-since_hit / 0.05).exp() * 0.5;
            let swell = 0.5 + 0.5 * (TAU * 0.1 * t).sin();
            pad * swell + hit
        })
        .collect()
}

pub fn run(args: RenderArgs) -> EyreResult<()> {
    let rate = args.sample_rate as f64;
    let mut config = EngineConfig::with_sample_rate(rate).level_policy(args.motion.level_policy());
    config.seed = args.motion.seed;

    let mut engine = Engine::new(config, DriveRegion::new(rate)).wrap_err("failed to build engine")?;
    engine.set_controllers(&args.motion.controllers().values()[..]);

    let input = test_signal(args.sample_rate, args.seconds);
    info!(
        "rendering {:.1} s at {} Hz, seed {}",
        args.seconds,
        args.sample_rate,
        engine.seed()
    );

    let spec = WavSpec {
        channels: 2,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&args.out, spec)
        .wrap_err_with(|| format!("failed to create {}", args.out.display()))?;

    let mut out_l = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut out_r = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut attach = vec![TimedEvent::new(0, CursorEvent::UiAttached)];
    let mut next_report = 0usize;

    for (index, block) in input.chunks(MAX_BLOCK_SIZE).enumerate() {
        let frames = block.len();
        let position = engine.process_block(
            [block, block],
            [&mut out_l[..frames], &mut out_r[..frames]],
            &mut attach.iter(),
        );
        attach.clear();

        let done = index * MAX_BLOCK_SIZE + frames;
        if let Some(position) = position {
            if done >= next_report {
                info!(
                    "t={:6.2}s  x={:.3} y={:.3}  speed={:.3} spin={:+.3}",
                    done as f64 / rate,
                    position.x,
                    position.y,
                    engine.cursor().speed,
                    engine.cursor().spin
                );
                next_report += args.sample_rate as usize;
            }
        }

        for (&l, &r) in out_l[..frames].iter().zip(&out_r[..frames]) {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }
    }

    writer.finalize().wrap_err("failed to finalize WAV")?;
    info!("wrote {}", args.out.display());
    Ok(())
}
