//! Low-level DSP primitives used by the engine.
//!
//! These components are allocation-free and realtime-safe once constructed.
//! They only hold signal-processing math; the engine owns their wiring and
//! the order in which they run.

/// Sectioned Butterworth low/high/band-pass filters.
pub mod butterworth;
/// Three-way crossover on the mono sum.
pub mod band;
/// Level followers (dB-referenced and peak-normalized).
pub mod level;
/// Flexibility trackers that turn levels or random walks into speed and spin.
pub mod flex;
/// Cursor integration and wall reflection.
pub mod cursor;
/// Bilinear corner interpolation.
pub mod grid;
/// Bypass ramp and dry/wet crossfade.
pub mod fader;
/// State-variable filter used by the reference effect.
pub mod svf;
/// Waveshaping functions.
pub mod distortion;

pub use band::{Band, BandSamples, BandSplit};
pub use cursor::{CursorState, Reflection};
pub use fader::Fader;
pub use flex::{Drift, FlexTarget, FlexTracker, Motion};
pub use level::{Level, LevelFollower};
