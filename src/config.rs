//! Engine construction parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::butterworth::MAX_ORDER, error::EngineError};

/// Host capability the engine cannot run without.
///
/// The cursor telemetry and override messages are keyed by mapped
/// identifiers, so a host that cannot map them cannot talk to the engine.
pub const URID_MAP: &str = "urid:map";

/// How the level follower references its input.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPolicy {
    /// Fixed window of -50..-10 dB mapped onto 0..1.
    #[default]
    DbReferenced,
    /// Normalize by a slowly decaying peak.
    PeakNormalized,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f64,
    /// `None` seeds from the wall clock at construction.
    pub seed: Option<u64>,
    pub level_policy: LevelPolicy,
    pub filter_order: usize,
    pub low_crossover_hz: f64,
    pub high_crossover_hz: f64,
    /// `None` draws a random starting heading.
    pub initial_heading: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            seed: None,
            level_policy: LevelPolicy::DbReferenced,
            filter_order: 8,
            low_crossover_hz: 200.0,
            high_crossover_hz: 4_000.0,
            initial_heading: None,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn level_policy(mut self, policy: LevelPolicy) -> Self {
        self.level_policy = policy;
        self
    }

    pub fn heading(mut self, heading: f64) -> Self {
        self.initial_heading = Some(heading);
        self
    }

    /// Band edges of the low/mid/high split. Both must sit below Nyquist.
    pub fn crossovers(mut self, low_hz: f64, high_hz: f64) -> Self {
        self.low_crossover_hz = low_hz;
        self.high_crossover_hz = high_hz;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(self.sample_rate));
        }

        let order = self.filter_order;
        if order == 0 || order % 2 != 0 || order > MAX_ORDER {
            return Err(EngineError::InvalidFilterOrder {
                order,
                max: MAX_ORDER,
            });
        }

        let nyquist = 0.5 * self.sample_rate;
        let (low, high) = (self.low_crossover_hz, self.high_crossover_hz);
        if !(low > 0.0 && low < high && high < nyquist) {
            return Err(EngineError::InvalidCrossover { low, high, nyquist });
        }

        Ok(())
    }
}
