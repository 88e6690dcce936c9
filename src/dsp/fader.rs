//! Bypass ramp and dry/wet crossfade.

/*
Bypass Fader
============

Switching an effect in or out instantly clicks. The fader ramps a gain
between 0 (bypassed) and 1 (engaged) at a fixed slope instead:

    target = 1 − bypass
    fader  = clamp(fader ± 100/fs, 0, 1)      until fader == target

A full ramp takes fs/100 samples, i.e. 10 ms at any sample rate.

Crossfade
---------

The effect output is blended with the untouched input:

    wet = fader · dry_wet
    out = wet · processed + (1 − wet) · dry

          1.0 ┐        ╱‾‾‾‾‾‾‾‾‾‾‾‾╲
              │       ╱              ╲         fader
          0.0 └──────╱────────────────╲──────
                   engage            bypass
                   (10 ms)           (10 ms)

When the fader sits at exactly zero the effect is not run at all and the
input is copied through.
*/

/// Ramp slope, in full-scale sweeps per second.
pub const FADE_RATE: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct Fader {
    value: f32,
    step: f32,
}

impl Fader {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            value: 0.0,
            step: (FADE_RATE / sample_rate).min(1.0) as f32,
        }
    }

    /// Advance one sample toward `1 − bypass`.
    #[inline]
    pub fn next_sample(&mut self, bypass: f32) -> f32 {
        let target = 1.0 - bypass;
        if self.value != target {
            self.value += if self.value < target {
                self.step
            } else {
                -self.step
            };
            self.value = self.value.clamp(0.0, 1.0);
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// True while the wrapped effect has to run.
    pub fn is_active(&self) -> bool {
        self.value != 0.0
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Blend processed into dry by `wet` (0 = dry only, 1 = processed only).
#[inline]
pub fn crossfade(dry: f32, processed: f32, wet: f32) -> f32 {
    wet * processed + (1.0 - wet) * dry
}
