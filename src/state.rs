//! State that survives across sessions: only the cursor position.
//!
//! Filters, levels, the fader and the random walk all restart from their
//! defaults on every instantiation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedState {
    pub x: f32,
    pub y: f32,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl PersistedState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Saved coordinates made safe to apply: clamped into the unit square,
    /// `None` for an axis that was not finite.
    pub fn sanitized(&self) -> (Option<f32>, Option<f32>) {
        let fix = |v: f32| v.is_finite().then(|| v.clamp(0.0, 1.0));
        (fix(self.x), fix(self.y))
    }
}
