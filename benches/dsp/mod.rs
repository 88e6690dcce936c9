//! Benchmarks for low-level DSP primitives.

mod butterworth;
mod cursor;
mod effect;
mod grid;
mod level;

pub use butterworth::bench_butterworth;
pub use cursor::bench_cursor;
pub use effect::bench_effect;
pub use grid::bench_grid;
pub use level::bench_level;
