//! Speed and spin flexibility: random drift blended with audio level.

/*
Flexibility
===========

A base speed or spin set by the user would give a cursor that moves like a
machine. Flexibility bends it: a slow random walk and an audio-reactive
offset are blended on top of the base value.

Vocabulary
----------

  random target   Slow random walk. Every second a new goal is drawn in
                  ±range and the target glides toward it over that second.

  flex value      Fast offset. With a RANDOM source it follows the random
                  deltas; with an audio source it chases the band level.

  amount          Blend weight. 1 = all flex value, 0 = all random target.

  direction       Spin only. ±1, re-rolled (coin toss) each time the level
                  drops into silence, so each new "attack" may turn the
                  other way.


Per sample
----------

    every fs samples:
        Δrand = U(−1, 1)·range − rand

    RANDOM source:
        Δflex = Δrand / (τ_random·fs)
    audio source, speed:
        Δflex = (2·level − 1)·range − flex
    audio source, spin:
        Δflex = dir·level·range − flex

    rand += Δrand / fs
    flex += Δflex

    signal = clamp(base + amount·flex + (1 − amount)·rand)

      speed ∈ [0, 1]      spin ∈ [−1, 1]

With range = 0 both rand and flex stay pinned at zero and the signal is the
base value, bit for bit.
*/

use rand::Rng;

use super::band::BandSamples;
use super::level::{Level, LevelFollower};
use crate::config::LevelPolicy;
use crate::params::FlexControls;

/// Glide time of the random component, in seconds.
pub const RANDOM_TIME: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexTarget {
    Speed,
    Spin,
}

impl FlexTarget {
    fn bounds(self) -> (f32, f32) {
        match self {
            Self::Speed => (0.0, 1.0),
            Self::Spin => (-1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlexTracker {
    target: FlexTarget,
    random_target: f32,
    random_target_delta: f32,
    flex_value: f32,
    direction: f32,
    level: Level,
    signal: f32,
    inv_rate: f32,
    random_slew: f32,
}

impl FlexTracker {
    pub fn new(target: FlexTarget, policy: LevelPolicy, sample_rate: f64) -> Self {
        Self {
            target,
            random_target: 0.0,
            random_target_delta: 0.0,
            flex_value: 0.0,
            direction: 1.0,
            level: Level::new(policy, sample_rate),
            signal: 0.0,
            inv_rate: (1.0 / sample_rate) as f32,
            random_slew: (1.0 / (RANDOM_TIME * sample_rate)) as f32,
        }
    }

    /// Aim the random walk at a fresh goal. `draw` is uniform in [−1, 1).
    pub fn redraw(&mut self, draw: f32, range: f32) {
        self.random_target_delta = draw * range - self.random_target;
    }

    /// Advance one sample and return the clamped control signal.
    #[inline]
    pub fn next_sample<R: Rng>(
        &mut self,
        controls: &FlexControls,
        bands: &BandSamples,
        rng: &mut R,
    ) -> f32 {
        let flex_delta = if controls.source.is_random() {
            self.random_target_delta * self.random_slew
        } else {
            let band_sample = bands.get(controls.source.band());
            self.level_delta(band_sample, controls.range, rng)
        };

        self.random_target += self.inv_rate * self.random_target_delta;
        self.flex_value += flex_delta;

        let (lo, hi) = self.target.bounds();
        let signal = controls.base
            + controls.amount * self.flex_value
            + (1.0 - controls.amount) * self.random_target;
        self.signal = if signal.is_finite() {
            signal.clamp(lo, hi)
        } else {
            controls.base.clamp(lo, hi)
        };
        self.signal
    }

    #[inline]
    fn level_delta<R: Rng>(&mut self, band_sample: f32, range: f32, rng: &mut R) -> f32 {
        match self.target {
            FlexTarget::Speed => {
                let level = self.level.next_sample(band_sample);
                (2.0 * level - 1.0) * range - self.flex_value
            }
            FlexTarget::Spin => {
                let threshold = self.level.silence_threshold();
                let was_above = self.level.raw() >= threshold;
                let level = self.level.next_sample(band_sample);
                if was_above && self.level.raw() < threshold && rng.gen_range(-1.0f32..1.0) < 0.0 {
                    self.direction = -self.direction;
                }
                self.direction * level * range - self.flex_value
            }
        }
    }

    /// Last value returned by [`FlexTracker::next_sample`].
    pub fn signal(&self) -> f32 {
        self.signal
    }

    pub fn random_target(&self) -> f32 {
        self.random_target
    }

    pub fn flex_value(&self) -> f32 {
        self.flex_value
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn level(&self) -> f32 {
        self.level.level()
    }

    pub fn reset(&mut self) {
        self.random_target = 0.0;
        self.random_target_delta = 0.0;
        self.flex_value = 0.0;
        self.direction = 1.0;
        self.level.reset();
        self.signal = 0.0;
    }
}

/// Both trackers plus the shared once-a-second redraw clock.
#[derive(Debug, Clone)]
pub struct Drift {
    pub speed: FlexTracker,
    pub spin: FlexTracker,
    count: f64,
    rate: f64,
}

/// Speed and spin for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub speed: f32,
    pub spin: f32,
}

impl Drift {
    pub fn new(policy: LevelPolicy, sample_rate: f64) -> Self {
        Self {
            speed: FlexTracker::new(FlexTarget::Speed, policy, sample_rate),
            spin: FlexTracker::new(FlexTarget::Spin, policy, sample_rate),
            count: 0.0,
            rate: sample_rate,
        }
    }

    #[inline]
    pub fn next_sample<R: Rng>(
        &mut self,
        speed: &FlexControls,
        spin: &FlexControls,
        bands: &BandSamples,
        rng: &mut R,
    ) -> Motion {
        if self.count >= self.rate {
            self.speed.redraw(rng.gen_range(-1.0f32..1.0), speed.range);
            self.spin.redraw(rng.gen_range(-1.0f32..1.0), spin.range);
            self.count = 0.0;
        } else {
            self.count += 1.0;
        }

        Motion {
            speed: self.speed.next_sample(speed, bands, rng),
            spin: self.spin.next_sample(spin, bands, rng),
        }
    }

    pub fn reset(&mut self) {
        self.speed.reset();
        self.spin.reset();
        self.count = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FlexSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SAMPLE_RATE: f64 = 1_000.0;

    fn controls(base: f32, range: f32, source: FlexSource, amount: f32) -> FlexControls {
        FlexControls {
            base,
            range,
            source,
            amount,
        }
    }

    fn bands(value: f32) -> BandSamples {
        BandSamples {
            full: value,
            low: value,
            mid: value,
            high: value,
        }
    }

    #[test]
    fn zero_range_yields_base_exactly() {
        let mut drift = Drift::new(LevelPolicy::DbReferenced, SAMPLE_RATE);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let speed = controls(0.5, 0.0, FlexSource::Random, 0.5);
        let spin = controls(-0.25, 0.0, FlexSource::Level, 0.5);

        for i in 0..5_000 {
            let motion = drift.next_sample(&speed, &spin, &bands((i as f32).sin()), &mut rng);
            assert_eq!(motion.speed, 0.5);
            assert_eq!(motion.spin, -0.25);
        }
    }

    #[test]
    fn random_walk_stays_within_range() {
        let mut drift = Drift::new(LevelPolicy::DbReferenced, SAMPLE_RATE);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let speed = controls(0.5, 0.3, FlexSource::Random, 0.0);
        let spin = controls(0.0, 0.3, FlexSource::Random, 0.0);

        for _ in 0..20_000 {
            drift.next_sample(&speed, &spin, &bands(0.0), &mut rng);
            assert!(drift.speed.random_target().abs() <= 0.3 + 1e-3);
            assert!(drift.spin.random_target().abs() <= 0.3 + 1e-3);
        }
    }

    #[test]
    fn random_flex_follows_random_target() {
        let mut drift = Drift::new(LevelPolicy::DbReferenced, SAMPLE_RATE);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let speed = controls(0.5, 0.4, FlexSource::Random, 1.0);
        let spin = controls(0.0, 0.4, FlexSource::Random, 1.0);

        for _ in 0..10_000 {
            drift.next_sample(&speed, &spin, &bands(0.0), &mut rng);
        }

        // Both integrate the same delta at the same one-second pace
        let gap = (drift.speed.flex_value() - drift.speed.random_target()).abs();
        assert!(gap < 1e-2, "flex drifted {} from target", gap);
    }

    #[test]
    fn loud_input_pushes_speed_up() {
        let mut drift = Drift::new(LevelPolicy::DbReferenced, SAMPLE_RATE);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let speed = controls(0.5, 0.5, FlexSource::Level, 1.0);
        let spin = controls(0.0, 0.0, FlexSource::Random, 0.0);

        let mut last = Motion { speed: 0.0, spin: 0.0 };
        for _ in 0..2_000 {
            last = drift.next_sample(&speed, &spin, &bands(1.0), &mut rng);
        }
        // level saturates at 1 → flex → +range
        assert!((last.speed - 1.0).abs() < 1e-3, "speed {}", last.speed);

        for _ in 0..2_000 {
            last = drift.next_sample(&speed, &spin, &bands(0.0), &mut rng);
        }
        // level falls to 0 → flex → −range
        assert!(last.speed.abs() < 1e-3, "speed {}", last.speed);
    }

    #[test]
    fn spin_direction_flips_only_at_silence() {
        let mut tracker = FlexTracker::new(FlexTarget::Spin, LevelPolicy::DbReferenced, SAMPLE_RATE);
        let spin = controls(0.0, 1.0, FlexSource::Level, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let mut flips = 0;
        for _ in 0..64 {
            // loud: level climbs, no downward crossing to flip on
            let before = tracker.direction();
            for _ in 0..300 {
                tracker.next_sample(&spin, &bands(1.0), &mut rng);
            }
            assert_eq!(tracker.direction(), before);

            // silence: level falls through the threshold once
            for _ in 0..1_000 {
                tracker.next_sample(&spin, &bands(0.0), &mut rng);
            }
            if tracker.direction() != before {
                flips += 1;
            }
        }

        // fair coin over 64 releases
        assert!(flips > 10 && flips < 54, "flips {}", flips);
    }

    #[test]
    fn signals_are_clamped() {
        let mut drift = Drift::new(LevelPolicy::DbReferenced, SAMPLE_RATE);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let speed = controls(1.0, 1.0, FlexSource::Level, 1.0);
        let spin = controls(-1.0, 2.0, FlexSource::Random, 0.0);

        for i in 0..10_000 {
            let x = if (i / 500) % 2 == 0 { 1.0 } else { 0.0 };
            let motion = drift.next_sample(&speed, &spin, &bands(x), &mut rng);
            assert!((0.0..=1.0).contains(&motion.speed));
            assert!((-1.0..=1.0).contains(&motion.spin));
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let run = || {
            let mut drift = Drift::new(LevelPolicy::DbReferenced, SAMPLE_RATE);
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            let speed = controls(0.3, 0.5, FlexSource::Random, 0.5);
            let spin = controls(0.1, 0.5, FlexSource::Random, 0.5);
            (0..5_000)
                .map(|_| drift.next_sample(&speed, &spin, &bands(0.0), &mut rng))
                .last()
        };
        assert_eq!(run(), run());
    }
}
