//! Three-way band split feeding the level followers.
//!
//! Each band owns its own filter and delay lines. Per sample, only the bands
//! somebody listens to are run, and each runs at most once: speed and spin
//! reading the same band see the same filtered value.

use super::butterworth::{BandPass, Butterworth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

/// One sample of band-limited signal, plus the unfiltered input.
///
/// Bands that were not requested this sample hold the unfiltered value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSamples {
    pub full: f32,
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandSamples {
    pub fn get(&self, band: Option<Band>) -> f32 {
        match band {
            None => self.full,
            Some(Band::Low) => self.low,
            Some(Band::Mid) => self.mid,
            Some(Band::High) => self.high,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BandSplit {
    lowpass: Butterworth,
    bandpass: BandPass,
    highpass: Butterworth,
}

impl BandSplit {
    pub fn new(sample_rate: f64, low_hz: f64, high_hz: f64, order: usize) -> Self {
        Self {
            lowpass: Butterworth::lowpass(sample_rate, low_hz, order),
            bandpass: BandPass::new(sample_rate, low_hz, high_hz, order),
            highpass: Butterworth::highpass(sample_rate, high_hz, order),
        }
    }

    /// Filter `mono` through each band named in `wanted`. Duplicates in
    /// `wanted` are filtered once.
    #[inline]
    pub fn process(&mut self, mono: f32, wanted: [Option<Band>; 2]) -> BandSamples {
        let wants = |band: Band| wanted.iter().any(|w| *w == Some(band));

        BandSamples {
            full: mono,
            low: if wants(Band::Low) {
                self.lowpass.process(mono)
            } else {
                mono
            },
            mid: if wants(Band::Mid) {
                self.bandpass.process(mono)
            } else {
                mono
            },
            high: if wants(Band::High) {
                self.highpass.process(mono)
            } else {
                mono
            },
        }
    }

    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.bandpass.reset();
        self.highpass.reset();
    }
}
