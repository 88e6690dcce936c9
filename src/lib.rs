pub mod config;
pub mod dsp;
pub mod effect; // Wrapped effect seam and reference effects
pub mod engine; // Block processing and the per-sample pipeline
pub mod error;
pub mod io; // Cursor events in, telemetry out
pub mod params; // Host controller table
pub mod state;

pub use config::{EngineConfig, LevelPolicy, URID_MAP};
pub use effect::{DriveRegion, Passthrough, StereoFrame, WrappedEffect};
pub use engine::Engine;
pub use error::EngineError;
pub use io::{CursorEvent, CursorPosition, EventReceiver, NoEvents, TelemetrySink, TimedEvent};
pub use params::{ControllerVector, FlexSource};
pub use state::PersistedState;

/// Largest block the command line front end allocates scratch for.
pub const MAX_BLOCK_SIZE: usize = 2048;
