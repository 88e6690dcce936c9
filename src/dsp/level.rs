//! Level followers: band-limited signal in, smoothed 0..1 level out.

/*
Level Following
===============

The flexibility trackers want to know "how much is going on" in a band, as
a slow, bounded number. A level follower turns the raw band signal into
exactly that.

Vocabulary
----------

  rectify     Take |x|. A band signal swings both ways; energy does not.

  reference   What counts as "full". Either a fixed dB window or the
              recent peak of the signal itself.

  one-pole    y = (1 − c)·y + c·x with c = 1/(τ·fs). Exponential approach
              to the input with time constant τ. It never reaches a
              constant input exactly, it only gets asymptotically close.


Two Policies
------------

DB-REFERENCED (default)

    dB    = 20·log10(0.5·|x|)
    norm  = (clamp(dB, −50, −10) + 50) / 40
    level = one-pole(norm)

    −50 dB and below reads as 0, −10 dB and above as 1. Same material
    always lands at the same level, whatever played before it.

PEAK-NORMALIZED

    peak  = |x| if |x| ≥ peak, else peak·(1 − 1/(4·fs))     (4 s decay)
    peak  = max(peak, 1e-4)                                  (−80 dB floor)
    level = one-pole(2·|x| / peak)

    Adapts to whatever is playing: a quiet passage after a loud one reads
    low at first, then climbs as the peak decays. The raw value can sit
    above 1; consumers read the clamped value.

          ┌────────────┐    ┌──────────┐    ┌──────────┐
    x ──▶ │  |x| → ref │──▶ │ one-pole │──▶ │ clamp 0‥1│──▶ level
          └────────────┘    └──────────┘    └──────────┘

Silence threshold
-----------------

The spin tracker flips direction when the level falls through a "silence"
line. Where that line sits depends on the policy: the dB window bottoms out
at 0, the peak-normalized level rarely drops below ~0.2 between notes.
*/

use crate::config::LevelPolicy;

/// Smoothing time constant of both policies, in seconds.
pub const LEVEL_TIME: f64 = 0.05;

const DB_FLOOR: f32 = -50.0;
const DB_CEIL: f32 = -10.0;
const PEAK_FLOOR: f32 = 1e-4;
const PEAK_DECAY_TIME: f64 = 4.0;

pub trait LevelFollower {
    /// Feed one band sample; returns the clamped level.
    fn next_sample(&mut self, band_sample: f32) -> f32;

    /// Smoothed level before clamping.
    fn raw(&self) -> f32;

    /// Level at which the spin direction may flip.
    fn silence_threshold(&self) -> f32;

    fn reset(&mut self);

    /// Current level, clamped to 0..1.
    fn level(&self) -> f32 {
        self.raw().clamp(0.0, 1.0)
    }
}

#[inline]
fn rectify(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.abs()
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct DbLevel {
    level: f32,
    coeff: f32,
}

impl DbLevel {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            level: 0.0,
            coeff: (1.0 / (LEVEL_TIME * sample_rate)).min(1.0) as f32,
        }
    }

    /// Map a rectified sample onto the 0..1 dB window.
    #[inline]
    pub fn normalize(magnitude: f32) -> f32 {
        let db = 20.0 * (0.5 * magnitude).max(1e-12).log10();
        (db.clamp(DB_FLOOR, DB_CEIL) - DB_FLOOR) / (DB_CEIL - DB_FLOOR)
    }
}

impl LevelFollower for DbLevel {
    #[inline]
    fn next_sample(&mut self, band_sample: f32) -> f32 {
        let norm = Self::normalize(rectify(band_sample));
        self.level = (1.0 - self.coeff) * self.level + self.coeff * norm;
        self.level()
    }

    fn raw(&self) -> f32 {
        self.level
    }

    fn silence_threshold(&self) -> f32 {
        0.001
    }

    fn reset(&mut self) {
        self.level = 0.0;
    }
}

#[derive(Debug, Clone)]
pub struct PeakLevel {
    level: f32,
    max_level: f32,
    coeff: f32,
    decay: f32,
}

impl PeakLevel {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            level: 0.0,
            max_level: 0.1,
            coeff: (1.0 / (LEVEL_TIME * sample_rate)).min(1.0) as f32,
            decay: (1.0 - 1.0 / (PEAK_DECAY_TIME * sample_rate)).max(0.0) as f32,
        }
    }

    pub fn peak(&self) -> f32 {
        self.max_level
    }
}

impl LevelFollower for PeakLevel {
    #[inline]
    fn next_sample(&mut self, band_sample: f32) -> f32 {
        let magnitude = rectify(band_sample);
        if magnitude >= self.max_level {
            self.max_level = magnitude;
        } else {
            self.max_level *= self.decay;
        }
        self.max_level = self.max_level.max(PEAK_FLOOR);

        let norm = 2.0 * magnitude / self.max_level;
        self.level = (1.0 - self.coeff) * self.level + self.coeff * norm;
        self.level()
    }

    fn raw(&self) -> f32 {
        self.level
    }

    fn silence_threshold(&self) -> f32 {
        0.2
    }

    fn reset(&mut self) {
        self.level = 0.0;
        self.max_level = 0.1;
    }
}

/// Policy chosen at construction, dispatched without allocation.
#[derive(Debug, Clone)]
pub enum Level {
    Db(DbLevel),
    Peak(PeakLevel),
}

impl Level {
    pub fn new(policy: LevelPolicy, sample_rate: f64) -> Self {
        match policy {
            LevelPolicy::DbReferenced => Self::Db(DbLevel::new(sample_rate)),
            LevelPolicy::PeakNormalized => Self::Peak(PeakLevel::new(sample_rate)),
        }
    }
}

impl LevelFollower for Level {
    #[inline]
    fn next_sample(&mut self, band_sample: f32) -> f32 {
        match self {
            Self::Db(level) => level.next_sample(band_sample),
            Self::Peak(level) => level.next_sample(band_sample),
        }
    }

    fn raw(&self) -> f32 {
        match self {
            Self::Db(level) => level.raw(),
            Self::Peak(level) => level.raw(),
        }
    }

    fn silence_threshold(&self) -> f32 {
        match self {
            Self::Db(level) => level.silence_threshold(),
            Self::Peak(level) => level.silence_threshold(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Db(level) => level.reset(),
            Self::Peak(level) => level.reset(),
        }
    }
}
