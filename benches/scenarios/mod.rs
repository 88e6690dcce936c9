//! Whole-engine benchmarks.
//!
//! These push complete blocks through `Engine::process_block` with the
//! source selections that cost the most (every band filter running).

mod engine;

pub use engine::bench_engine;
