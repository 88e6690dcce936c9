//! Host-facing controller table.
//!
//! Controllers arrive as a flat array of floats once per block. Each slot has
//! its own [`Limit`] and is corrected on the way in, never rejected: audio must
//! keep running whatever the host sends.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::band::Band;

pub const BYPASS: usize = 0;
pub const DRY_WET: usize = 1;
pub const SPEED: usize = 2;
pub const SPEED_RANGE: usize = 3;
pub const SPEED_TYPE: usize = 4;
pub const SPEED_AMOUNT: usize = 5;
pub const SPIN: usize = 6;
pub const SPIN_RANGE: usize = 7;
pub const SPIN_TYPE: usize = 8;
pub const SPIN_AMOUNT: usize = 9;
/// First slot of the FX corner presets.
pub const FX: usize = 10;
pub const NR_FX: usize = 4;

pub const PARAM_GAIN: usize = 0;
pub const PARAM_FIRST: usize = 1;
pub const PARAM_LAST: usize = 2;
pub const PARAM_NUKE: usize = 3;
pub const PARAM_MIX: usize = 4;
pub const PARAM_PAN: usize = 5;
pub const NR_PARAMS: usize = 6;

pub const NR_CONTROLLERS: usize = FX + NR_FX * NR_PARAMS;

/// One parameter vector for the wrapped effect.
pub type FxParams = [f32; NR_PARAMS];

/// The four corner presets, ordered (0,0), (0,1), (1,1), (1,0).
pub type FxGrid = [FxParams; NR_FX];

/// Accepted range of one controller.
///
/// `step > 0` snaps the value onto a grid starting at `min` (switches and
/// selectors). `default` replaces anything non-finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limit {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl Limit {
    pub const fn new(min: f32, max: f32, step: f32, default: f32) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    #[inline]
    pub fn validate(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default;
        }

        let clamped = value.clamp(self.min, self.max);
        if self.step > 0.0 {
            let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
            snapped.clamp(self.min, self.max)
        } else {
            clamped
        }
    }
}

const UNIT: Limit = Limit::new(0.0, 1.0, 0.0, 0.0);
const PAN: Limit = Limit::new(-1.0, 1.0, 0.0, 0.0);

pub const CONTROLLER_LIMITS: [Limit; NR_CONTROLLERS] = [
    Limit::new(0.0, 1.0, 1.0, 0.0),  // Bypass
    Limit::new(0.0, 1.0, 0.0, 1.0),  // Dry/wet
    Limit::new(0.0, 1.0, 0.0, 0.5),  // Speed
    Limit::new(0.0, 1.0, 0.0, 0.5),  // Speed range
    Limit::new(0.0, 4.0, 1.0, 0.0),  // Speed type
    Limit::new(0.0, 1.0, 0.0, 0.5),  // Speed amount
    Limit::new(-1.0, 1.0, 0.0, 0.0), // Spin
    Limit::new(0.0, 2.0, 0.0, 0.5),  // Spin range
    Limit::new(0.0, 4.0, 1.0, 0.0),  // Spin type
    Limit::new(0.0, 1.0, 0.0, 0.5),  // Spin amount
    UNIT, UNIT, UNIT, UNIT, UNIT, PAN, // FX1: gain, first, last, nuke, mix, pan
    UNIT, UNIT, UNIT, UNIT, UNIT, PAN, // FX2
    UNIT, UNIT, UNIT, UNIT, UNIT, PAN, // FX3
    UNIT, UNIT, UNIT, UNIT, UNIT, PAN, // FX4
];

/// What drives a flexibility tracker.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexSource {
    /// Slow random walk, no audio involvement.
    #[default]
    Random,
    /// Level of the full-band mono sum.
    Level,
    Lows,
    Mids,
    Highs,
}

impl FlexSource {
    /// Decode a selector controller. Rounds and saturates, so every float
    /// maps onto a variant.
    pub fn from_controller(value: f32) -> Self {
        if !value.is_finite() {
            return Self::Random;
        }
        match value.round() {
            v if v <= 0.0 => Self::Random,
            v if v <= 1.0 => Self::Level,
            v if v <= 2.0 => Self::Lows,
            v if v <= 3.0 => Self::Mids,
            _ => Self::Highs,
        }
    }

    /// Band filter this source listens to, if any.
    pub fn band(self) -> Option<Band> {
        match self {
            Self::Lows => Some(Band::Low),
            Self::Mids => Some(Band::Mid),
            Self::Highs => Some(Band::High),
            Self::Random | Self::Level => None,
        }
    }

    pub fn is_random(self) -> bool {
        matches!(self, Self::Random)
    }
}

/// The four controls shared by the speed and spin trackers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexControls {
    pub base: f32,
    pub range: f32,
    pub source: FlexSource,
    /// Blend between level-driven flex (1.0) and random walk (0.0).
    pub amount: f32,
}

/// Validated snapshot of every controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerVector {
    values: [f32; NR_CONTROLLERS],
}

impl Default for ControllerVector {
    fn default() -> Self {
        Self {
            values: [0.0; NR_CONTROLLERS],
        }
    }
}

impl ControllerVector {
    /// Table defaults rather than all-zero.
    pub fn factory() -> Self {
        let mut values = [0.0; NR_CONTROLLERS];
        for (value, limit) in values.iter_mut().zip(CONTROLLER_LIMITS.iter()) {
            *value = limit.default;
        }
        Self { values }
    }

    /// Validate and store a full set of raw host values. Slots whose raw
    /// value is unchanged are skipped; a short slice leaves the tail alone.
    pub fn update(&mut self, raw: &[f32]) {
        for (index, &value) in raw.iter().enumerate().take(NR_CONTROLLERS) {
            if self.values[index] != value {
                self.values[index] = CONTROLLER_LIMITS[index].validate(value);
            }
        }
    }

    /// Validate and store one controller. Out-of-table indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(limit) = CONTROLLER_LIMITS.get(index) {
            self.values[index] = limit.validate(value);
        }
    }

    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &[f32; NR_CONTROLLERS] {
        &self.values
    }

    pub fn bypass(&self) -> f32 {
        self.values[BYPASS]
    }

    pub fn dry_wet(&self) -> f32 {
        self.values[DRY_WET]
    }

    pub fn speed(&self) -> FlexControls {
        FlexControls {
            base: self.values[SPEED],
            range: self.values[SPEED_RANGE],
            source: FlexSource::from_controller(self.values[SPEED_TYPE]),
            amount: self.values[SPEED_AMOUNT],
        }
    }

    pub fn spin(&self) -> FlexControls {
        FlexControls {
            base: self.values[SPIN],
            range: self.values[SPIN_RANGE],
            source: FlexSource::from_controller(self.values[SPIN_TYPE]),
            amount: self.values[SPIN_AMOUNT],
        }
    }

    /// Set one parameter of one corner preset.
    pub fn set_fx(&mut self, corner: usize, param: usize, value: f32) {
        if corner < NR_FX && param < NR_PARAMS {
            self.set(FX + corner * NR_PARAMS + param, value);
        }
    }

    pub fn grid(&self) -> FxGrid {
        let mut grid = [[0.0; NR_PARAMS]; NR_FX];
        for (corner, preset) in grid.iter_mut().enumerate() {
            let start = FX + corner * NR_PARAMS;
            preset.copy_from_slice(&self.values[start..start + NR_PARAMS]);
        }
        grid
    }
}
