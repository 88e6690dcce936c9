use std::time::Duration;

use clap::Args;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};
use rtrb::RingBuffer;
use wander_dsp::{
    CursorEvent, CursorPosition, DriveRegion, Engine, EngineConfig, TelemetrySink, TimedEvent, MAX_BLOCK_SIZE,
};

use crate::MotionArgs;

const INPUT_QUEUE_SIZE: usize = MAX_BLOCK_SIZE * 16;
const EVENT_QUEUE_SIZE: usize = 64;
const TELEMETRY_QUEUE_SIZE: usize = 256;

#[derive(Args, Debug)]
pub struct LiveArgs {
    /// Pin the cursor here instead of letting it wander ("x,y")
    #[arg(long, value_parser = parse_point)]
    pin: Option<(f32, f32)>,

    /// Telemetry print interval in milliseconds
    #[arg(long, default_value_t = 250)]
    interval_ms: u64,

    #[command(flatten)]
    motion: MotionArgs,
}

fn parse_point(raw: &str) -> Result<(f32, f32), String> {
    let (x, y) = raw.split_once(',').ok_or("expected x,y")?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

pub fn run(args: LiveArgs) -> EyreResult<()> {
    let host = cpal::default_host();
    let output = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let input = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;

    let out_config = output
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let in_config = input
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;

    let sample_rate = out_config.sample_rate().0;
    if in_config.sample_rate().0 != sample_rate {
        return Err(eyre!(
            "input runs at {} Hz but output at {} Hz",
            in_config.sample_rate().0,
            sample_rate
        ));
    }
    let in_channels = in_config.channels() as usize;
    let out_channels = out_config.channels() as usize;

    let rate = sample_rate as f64;
    let mut config = EngineConfig::with_sample_rate(rate).level_policy(args.motion.level_policy());
    config.seed = args.motion.seed;
    let mut engine = Engine::new(config, DriveRegion::new(rate)).wrap_err("failed to build engine")?;
    engine.set_controllers(&args.motion.controllers().values()[..]);

    info!(
        "live: {} Hz, {} in / {} out channels, seed {}",
        sample_rate,
        in_channels,
        out_channels,
        engine.seed()
    );

    let (mut input_tx, mut input_rx) = RingBuffer::<f32>::new(INPUT_QUEUE_SIZE);
    let (mut event_tx, mut event_rx) = RingBuffer::<TimedEvent>::new(EVENT_QUEUE_SIZE);
    let (mut telemetry_tx, mut telemetry_rx) = RingBuffer::<CursorPosition>::new(TELEMETRY_QUEUE_SIZE);

    let _ = event_tx.push(TimedEvent::new(0, CursorEvent::UiAttached));
    if let Some((x, y)) = args.pin {
        let _ = event_tx.push(TimedEvent::new(0, CursorEvent::Override { x, y }));
    }

    let input_stream = input.build_input_stream(
        &in_config.into(),
        move |data: &[f32], _| {
            // Fold whatever the device gives into stereo pairs.
            for frame in data.chunks(in_channels.max(1)) {
                let left = frame.first().copied().unwrap_or(0.0);
                let right = frame.get(1).copied().unwrap_or(left);
                if input_tx.slots() < 2 {
                    break;
                }
                let _ = input_tx.push(left);
                let _ = input_tx.push(right);
            }
        },
        |err| error!("input stream: {}", err),
        None,
    )?;

    let mut in_l = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut in_r = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut out_l = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut out_r = vec![0.0f32; MAX_BLOCK_SIZE];

    let output_stream = output.build_output_stream(
        &out_config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / out_channels.max(1);
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                for i in 0..frames {
                    in_l[i] = input_rx.pop().unwrap_or(0.0);
                    in_r[i] = input_rx.pop().unwrap_or(0.0);
                }

                let position = engine.process_block(
                    [&in_l[..frames], &in_r[..frames]],
                    [&mut out_l[..frames], &mut out_r[..frames]],
                    &mut event_rx,
                );
                if let Some(position) = position {
                    telemetry_tx.send(position);
                }

                let offset = frames_written * out_channels;
                for i in 0..frames {
                    let frame = &mut data[offset + i * out_channels..offset + (i + 1) * out_channels];
                    for (ch, sample) in frame.iter_mut().enumerate() {
                        *sample = if ch % 2 == 0 { out_l[i] } else { out_r[i] };
                    }
                }

                frames_written += frames;
            }
        },
        |err| error!("output stream: {}", err),
        None,
    )?;

    input_stream.play()?;
    output_stream.play()?;
    println!("Processing... Press Ctrl+C to stop");

    let interval = Duration::from_millis(args.interval_ms.max(10));
    loop {
        std::thread::sleep(interval);
        let mut latest = None;
        while let Ok(position) = telemetry_rx.pop() {
            latest = Some(position);
        }
        if let Some(position) = latest {
            println!("x={:.3} y={:.3}", position.x, position.y);
        }
    }
}
