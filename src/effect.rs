//! The effect being morphed, and the reference effects shipped with the crate.
//!
//! The engine knows nothing about what the effect does. Every sample it hands
//! over an interpolated [`FxParams`] vector and one stereo frame, and takes a
//! frame back.

use crate::dsp::distortion::{foldback, soft_clip};
use crate::dsp::svf::SVFilter;
use crate::params::{FxParams, PARAM_FIRST, PARAM_GAIN, PARAM_LAST, PARAM_MIX, PARAM_NUKE, PARAM_PAN};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    pub fn mono(&self) -> f32 {
        0.5 * (self.left + self.right)
    }
}

/// Effect wrapped by the engine.
///
/// `set_parameters` is called once per sample, right before `process`, so
/// implementations must keep it cheap and allocation-free.
pub trait WrappedEffect: Send {
    fn set_parameters(&mut self, params: &FxParams);

    fn process(&mut self, frame: StereoFrame) -> StereoFrame;

    /// Drop internal state (filter memories, delay lines).
    ///
    /// Default implementation does nothing (stateless effects).
    fn reset(&mut self) {}
}

impl WrappedEffect for Box<dyn WrappedEffect> {
    fn set_parameters(&mut self, params: &FxParams) {
        (**self).set_parameters(params);
    }

    fn process(&mut self, frame: StereoFrame) -> StereoFrame {
        (**self).process(frame)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Returns its input. Useful for hosting the engine without an effect and
/// for checking the fader path in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl WrappedEffect for Passthrough {
    fn set_parameters(&mut self, _params: &FxParams) {}

    fn process(&mut self, frame: StereoFrame) -> StereoFrame {
        frame
    }
}

/*
Drive Region
============

Distorts one frequency region and leaves the rest of the spectrum alone.

    x ──┬──▶ HP(first) ──▶ LP(last) ──▶ shaper ──┐
        │                                        ▼
        └────────────────────────────────▶ (1−mix)·x + mix·shaped ──▶ pan

  gain   drive = 1 + 19·gain
  first  lower region corner, 20·1000^first Hz (20 Hz … 20 kHz)
  last   upper region corner, same mapping; swapped with first if lower
  nuke   crossfade from soft clip (0) to foldback (1)
  mix    effect-internal wet amount
  pan    linear balance, −1 = left only, +1 = right only

The shaper output is divided by the drive's soft-clip ceiling so cranking
gain changes colour more than loudness.
*/

const CORNER_LOW_HZ: f32 = 20.0;
const CORNER_SPAN: f32 = 1_000.0;

#[inline]
fn corner_hz(value: f32) -> f32 {
    CORNER_LOW_HZ * CORNER_SPAN.powf(value.clamp(0.0, 1.0))
}

#[derive(Debug, Clone)]
struct RegionChannel {
    highpass: SVFilter,
    lowpass: SVFilter,
}

impl RegionChannel {
    fn new(sample_rate: f64) -> Self {
        Self {
            highpass: SVFilter::highpass(sample_rate, CORNER_LOW_HZ),
            lowpass: SVFilter::lowpass(sample_rate, CORNER_LOW_HZ * CORNER_SPAN),
        }
    }

    #[inline]
    fn process(&mut self, sample: f32) -> f32 {
        self.lowpass.process(self.highpass.process(sample))
    }

    fn reset(&mut self) {
        self.highpass.reset();
        self.lowpass.reset();
    }
}

#[derive(Debug, Clone)]
pub struct DriveRegion {
    channels: [RegionChannel; 2],
    drive: f32,
    makeup: f32,
    nuke: f32,
    mix: f32,
    left_gain: f32,
    right_gain: f32,
}

impl DriveRegion {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            channels: [RegionChannel::new(sample_rate), RegionChannel::new(sample_rate)],
            drive: 1.0,
            makeup: 2.0,
            nuke: 0.0,
            mix: 0.0,
            left_gain: 1.0,
            right_gain: 1.0,
        }
    }

    #[inline]
    fn shape(&self, sample: f32) -> f32 {
        let soft = soft_clip(sample, self.drive) * self.makeup;
        let folded = foldback(sample, self.drive, 1.0);
        soft + self.nuke * (folded - soft)
    }
}

impl WrappedEffect for DriveRegion {
    #[inline]
    fn set_parameters(&mut self, params: &FxParams) {
        let gain = params[PARAM_GAIN].clamp(0.0, 1.0);
        self.drive = 1.0 + 19.0 * gain;
        // soft_clip(1, drive) = drive / (1 + drive)
        self.makeup = (1.0 + self.drive) / self.drive;
        self.nuke = params[PARAM_NUKE].clamp(0.0, 1.0);
        self.mix = params[PARAM_MIX].clamp(0.0, 1.0);

        let (mut low, mut high) = (corner_hz(params[PARAM_FIRST]), corner_hz(params[PARAM_LAST]));
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }
        for channel in self.channels.iter_mut() {
            channel.highpass.set_cutoff(low);
            channel.lowpass.set_cutoff(high);
        }

        let pan = params[PARAM_PAN].clamp(-1.0, 1.0);
        self.left_gain = (1.0 - pan).min(1.0);
        self.right_gain = (1.0 + pan).min(1.0);
    }

    #[inline]
    fn process(&mut self, frame: StereoFrame) -> StereoFrame {
        let region_l = self.channels[0].process(frame.left);
        let region_r = self.channels[1].process(frame.right);
        let shaped_l = self.shape(region_l);
        let shaped_r = self.shape(region_r);

        StereoFrame {
            left: self.left_gain * ((1.0 - self.mix) * frame.left + self.mix * shaped_l),
            right: self.right_gain * ((1.0 - self.mix) * frame.right + self.mix * shaped_r),
        }
    }

    fn reset(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.reset();
        }
    }
}
