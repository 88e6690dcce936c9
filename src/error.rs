//! Construction-time failures.
//!
//! Only configuration problems are errors. Anything that happens once audio
//! is flowing (out-of-range controllers, odd events, silent input) is
//! corrected in place and never surfaces here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f64),

    #[error("filter order must be even and within 2..={max}, got {order}")]
    InvalidFilterOrder { order: usize, max: usize },

    #[error("band crossovers must satisfy 0 < low ({low} Hz) < high ({high} Hz) < nyquist ({nyquist} Hz)")]
    InvalidCrossover { low: f64, high: f64, nyquist: f64 },

    #[error("host does not provide required feature `{0}`")]
    MissingFeature(&'static str),
}
