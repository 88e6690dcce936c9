//! Cascaded Butterworth filters used as energy-detection front-ends.

/*
Butterworth Cascades
====================

The band filters never shape what you hear. They only isolate a slice of
the spectrum so the level follower can ask "how loud are the lows right
now?". What matters is a flat passband (no resonant bump that would fake
energy) and steep skirts, which is exactly what a Butterworth gives.

Vocabulary
----------

  order       Number of poles. Each doubling of order doubles the slope:
              order 8 rolls off at 48 dB/octave past the corner.

  section     One second-order (biquad) stage. An order-N filter is N/2
              sections in series.

  prewarp     a = tan(π·fc/fs). Maps the analog corner onto the digital
              frequency axis so the -3 dB point lands where asked.


One Section (direct form II)
----------------------------

    w0 = d1·w1 + d2·w2 + x
    y  = A·(w0 + f1·w1 + w2)
    w2 = w1, w1 = w0

Feedback taps d1/d2 are shared by the low-pass and high-pass designs; only
the feed-forward differs:

    low-pass   A = a²/s   f1 = +2     (zeros at nyquist)
    high-pass  A = 1/s    f1 = -2     (zeros at DC)

with, for section k of n,

    r  = sin(π·(2k+1) / (4n))
    s  = a² + 2·a·r + 1
    d1 = 2·(1 − a²) / s
    d2 = −(a² − 2·a·r + 1) / s


Band-pass
---------

High-pass at the lower corner, then low-pass at the upper one:

    x ──▶ HPF(f_low) ──▶ LPF(f_high) ──▶ y

State is kept in f64: at 200 Hz and 48 kHz the poles sit close to the unit
circle and f32 delay lines drift.
*/

use std::f64::consts::PI;

pub const MAX_ORDER: usize = 16;
const MAX_SECTIONS: usize = MAX_ORDER / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    LowPass,
    HighPass,
}

#[derive(Debug, Clone)]
pub struct Butterworth {
    sections: usize,
    gain: [f64; MAX_SECTIONS],
    d1: [f64; MAX_SECTIONS],
    d2: [f64; MAX_SECTIONS],
    f1: f64,
    w1: [f64; MAX_SECTIONS],
    w2: [f64; MAX_SECTIONS],
}

impl Butterworth {
    /// Order is forced even and into `2..=MAX_ORDER`; the cutoff is kept
    /// strictly inside (0, nyquist).
    pub fn new(response: Response, sample_rate: f64, cutoff_hz: f64, order: usize) -> Self {
        let order = (order.clamp(2, MAX_ORDER) / 2) * 2;
        let sections = order / 2;
        let nyquist = 0.5 * sample_rate;
        let cutoff = cutoff_hz.clamp(1e-3, nyquist * 0.999);

        let a = (PI * cutoff / sample_rate).tan();
        let a2 = a * a;

        let mut gain = [0.0; MAX_SECTIONS];
        let mut d1 = [0.0; MAX_SECTIONS];
        let mut d2 = [0.0; MAX_SECTIONS];

        for k in 0..sections {
            let r = (PI * (2.0 * k as f64 + 1.0) / (4.0 * sections as f64)).sin();
            let s = a2 + 2.0 * a * r + 1.0;
            gain[k] = match response {
                Response::LowPass => a2 / s,
                Response::HighPass => 1.0 / s,
            };
            d1[k] = 2.0 * (1.0 - a2) / s;
            d2[k] = -(a2 - 2.0 * a * r + 1.0) / s;
        }

        Self {
            sections,
            gain,
            d1,
            d2,
            f1: match response {
                Response::LowPass => 2.0,
                Response::HighPass => -2.0,
            },
            w1: [0.0; MAX_SECTIONS],
            w2: [0.0; MAX_SECTIONS],
        }
    }

    pub fn lowpass(sample_rate: f64, cutoff_hz: f64, order: usize) -> Self {
        Self::new(Response::LowPass, sample_rate, cutoff_hz, order)
    }

    pub fn highpass(sample_rate: f64, cutoff_hz: f64, order: usize) -> Self {
        Self::new(Response::HighPass, sample_rate, cutoff_hz, order)
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut x = input as f64;

        for k in 0..self.sections {
            let w0 = self.d1[k] * self.w1[k] + self.d2[k] * self.w2[k] + x;
            x = self.gain[k] * (w0 + self.f1 * self.w1[k] + self.w2[k]);
            self.w2[k] = self.w1[k];
            self.w1[k] = w0;
        }

        x as f32
    }

    pub fn order(&self) -> usize {
        self.sections * 2
    }

    pub fn reset(&mut self) {
        self.w1 = [0.0; MAX_SECTIONS];
        self.w2 = [0.0; MAX_SECTIONS];
    }
}

#[derive(Debug, Clone)]
pub struct BandPass {
    highpass: Butterworth,
    lowpass: Butterworth,
}

impl BandPass {
    pub fn new(sample_rate: f64, low_hz: f64, high_hz: f64, order: usize) -> Self {
        Self {
            highpass: Butterworth::highpass(sample_rate, low_hz, order),
            lowpass: Butterworth::lowpass(sample_rate, high_hz, order),
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.lowpass.process(self.highpass.process(input))
    }

    pub fn reset(&mut self) {
        self.highpass.reset();
        self.lowpass.reset();
    }
}
