//! wander - drive a morphing effect with a wandering cursor
//!
//! Run with: cargo run -- render --seconds 10 --out wander.wav
//!       or: cargo run -- live

mod live;
mod render;

use clap::{Args, Parser, Subcommand};
use wander_dsp::{
    params::{self, ControllerVector, FX, NR_PARAMS},
    LevelPolicy,
};

#[derive(Parser)]
#[command(name = "wander", about = "Cursor-driven effect morphing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a generated test signal through the engine to a WAV file
    Render(render::RenderArgs),
    /// Process the default input device to the default output device
    Live(live::LiveArgs),
}

/// Motion controls shared by both commands.
#[derive(Args, Debug, Clone)]
pub struct MotionArgs {
    /// Base speed (0..1)
    #[arg(long, default_value_t = 0.5)]
    speed: f32,

    /// Speed flexibility range (0..1)
    #[arg(long, default_value_t = 0.5)]
    speed_range: f32,

    /// Speed source: 0 random, 1 level, 2 lows, 3 mids, 4 highs
    #[arg(long, default_value_t = 0)]
    speed_type: u8,

    /// Base spin (-1..1)
    #[arg(long, default_value_t = 0.0)]
    spin: f32,

    /// Spin flexibility range (0..2)
    #[arg(long, default_value_t = 0.5)]
    spin_range: f32,

    /// Spin source: 0 random, 1 level, 2 lows, 3 mids, 4 highs
    #[arg(long, default_value_t = 0)]
    spin_type: u8,

    /// Dry/wet (0..1)
    #[arg(long, default_value_t = 1.0)]
    dry_wet: f32,

    /// Use the adaptive peak-normalized level follower
    #[arg(long)]
    peak_levels: bool,

    /// Fixed seed for the random walk
    #[arg(long)]
    seed: Option<u64>,
}

impl MotionArgs {
    pub fn level_policy(&self) -> LevelPolicy {
        if self.peak_levels {
            LevelPolicy::PeakNormalized
        } else {
            LevelPolicy::DbReferenced
        }
    }

    /// Factory controllers with the motion overrides and a demo corner grid
    /// for the drive effect.
    pub fn controllers(&self) -> ControllerVector {
        let mut controllers = ControllerVector::factory();
        controllers.set(params::DRY_WET, self.dry_wet);
        controllers.set(params::SPEED, self.speed);
        controllers.set(params::SPEED_RANGE, self.speed_range);
        controllers.set(params::SPEED_TYPE, self.speed_type as f32);
        controllers.set(params::SPIN, self.spin);
        controllers.set(params::SPIN_RANGE, self.spin_range);
        controllers.set(params::SPIN_TYPE, self.spin_type as f32);

        // gain, first, last, nuke, mix, pan
        const CORNERS: [[f32; NR_PARAMS]; 4] = [
            [0.2, 0.0, 0.3, 0.0, 0.8, -0.5], // (0,0) warm lows, left
            [0.9, 0.3, 0.6, 0.0, 1.0, 0.0],  // (0,1) hot mids
            [1.0, 0.5, 1.0, 1.0, 1.0, 0.5],  // (1,1) folded highs, right
            [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],  // (1,0) clean
        ];
        for (corner, preset) in CORNERS.iter().enumerate() {
            for (param, &value) in preset.iter().enumerate() {
                controllers.set(FX + corner * NR_PARAMS + param, value);
            }
        }
        controllers
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Render(args) => render::run(args),
        Command::Live(args) => live::run(args),
    }
}
