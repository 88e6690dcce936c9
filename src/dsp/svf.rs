use std::f32::consts::TAU;

/*
| response  | output tap             | passes       | rejects      |
| --------- | ---------------------- | ------------ | ------------ |
| low-pass  | v2                     | below cutoff | above cutoff |
| high-pass | x − k·v1 − v2          | above cutoff | below cutoff |

Topology-preserving (trapezoidal) state-variable filter, 12 dB/oct. Cheap
enough to re-tune every sample, which the corner-morphing effects do: the
cursor moves every sample so their cutoffs do too.

    g = tan(π·fc/fs)
    k = 2                    (Q = 0.5, no peak at the cutoff)
*/

const DAMPING: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvfResponse {
    LowPass,
    HighPass,
}

pub struct SvfOutputs {
    pub lowpass: f32,
    pub highpass: f32,
}

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    sample_rate: f32,
    cutoff_hz: f32,
    response: SvfResponse,
    g: f32,
}

impl SVFilter {
    pub fn new(response: SvfResponse, sample_rate: f64, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate: sample_rate as f32,
            cutoff_hz,
            response,
            g: 0.0,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    pub fn lowpass(sample_rate: f64, cutoff_hz: f32) -> Self {
        Self::new(SvfResponse::LowPass, sample_rate, cutoff_hz)
    }

    pub fn highpass(sample_rate: f64, cutoff_hz: f32) -> Self {
        Self::new(SvfResponse::HighPass, sample_rate, cutoff_hz)
    }

    /// Retune. The cutoff is kept below Nyquist so `tan` stays finite.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        let nyquist = 0.5 * self.sample_rate;
        let cutoff_hz = if cutoff_hz.is_finite() {
            cutoff_hz.clamp(1.0, 0.49 * self.sample_rate.max(2.0))
        } else {
            nyquist * 0.5
        };
        if cutoff_hz == self.cutoff_hz && self.g != 0.0 {
            return;
        }
        self.cutoff_hz = cutoff_hz;
        self.g = (TAU * cutoff_hz / (2.0 * self.sample_rate)).tan();
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    #[inline]
    pub fn tick(&mut self, sample: f32) -> SvfOutputs {
        let g = self.g;
        let k = DAMPING;
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        SvfOutputs {
            lowpass: v2,
            highpass: sample - k * v1 - v2,
        }
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let outputs = self.tick(sample);
        match self.response {
            SvfResponse::LowPass => outputs.lowpass,
            SvfResponse::HighPass => outputs.highpass,
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 48_000.0;

    fn sine_peak(filter: &mut SVFilter, freq: f32, samples: usize) -> f32 {
        let mut peak = 0.0f32;
        for i in 0..samples {
            let x = (TAU * freq * i as f32 / SAMPLE_RATE as f32).sin();
            let y = filter.process(x);
            if i >= samples / 2 {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn lowpass_settles_on_dc() {
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 500.0);
        let mut y = 0.0;
        for _ in 0..2_048 {
            y = filter.process(1.0);
        }
        assert!(y > 0.99, "lowpass DC gain {}", y);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut filter = SVFilter::highpass(SAMPLE_RATE, 500.0);
        let mut y = 1.0;
        for _ in 0..2_048 {
            y = filter.process(1.0);
        }
        assert!(y.abs() < 1e-3, "highpass DC leak {}", y);
    }

    #[test]
    fn lowpass_attenuates_a_decade_up() {
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 500.0);
        let peak = sine_peak(&mut filter, 5_000.0, 4_800);
        assert!(peak < 0.05, "expected ~-40 dB, got peak {}", peak);
    }

    #[test]
    fn cutoff_gain_has_no_peak() {
        // Q = 0.5: a sine at the cutoff comes out at half amplitude
        let mut lowpass = SVFilter::lowpass(SAMPLE_RATE, 1_000.0);
        let low = sine_peak(&mut lowpass, 1_000.0, 9_600);
        let mut highpass = SVFilter::highpass(SAMPLE_RATE, 1_000.0);
        let high = sine_peak(&mut highpass, 1_000.0, 9_600);
        assert!((low - 0.5).abs() < 0.05, "lowpass gain at cutoff {}", low);
        assert!((high - 0.5).abs() < 0.05, "highpass gain at cutoff {}", high);
    }

    #[test]
    fn retuning_changes_response() {
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 200.0);
        let closed = sine_peak(&mut filter, 1_000.0, 4_800);
        filter.reset();
        filter.set_cutoff(8_000.0);
        let open = sine_peak(&mut filter, 1_000.0, 4_800);
        assert!(open > closed * 2.0, "open={} closed={}", open, closed);
    }

    #[test]
    fn cutoff_is_kept_below_nyquist() {
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 100_000.0);
        assert!(filter.cutoff() < 24_000.0);
        filter.set_cutoff(f32::NAN);
        assert!(filter.cutoff().is_finite());
        for _ in 0..1_000 {
            assert!(filter.process(0.5).is_finite());
        }
    }
}
