//! Cursor motion on the unit square.

/*
Cursor Integrator
=================

The cursor is a point (x, y) in [0,1]² with a heading. Speed pushes it
forward, spin turns it. When it hits a wall it bounces.

Heading convention
------------------

    dx = sin(ang)        ang = 0    → straight up the y axis
    dy = cos(ang)        ang = π/2  → along +x

    ang += 2π·(10/fs)·spin      spin = 1 → one full turn every fs/10 samples

Step size
---------

    x += dx·speed²/fs
    y += dy·speed²/fs

Quadratic in speed: the lower half of the speed control barely moves the
cursor, the top end sweeps it across the square in about a second.

Reflections
-----------

    x wall:   x clamped;  if dx still points out → ang = −ang,     spin = 0
    y wall:   y clamped;  if dy still points out → ang = −π − ang, spin = 0

          y=1 ┌───────────┐
              │     ↗     │  hits x=1 with dx > 0
              │   ↗       │  → ang = −ang, heading now ↖
              │ ↗         │
          y=0 └───────────┘
             x=0         x=1

Both walls can fire in the same sample (corner hit). Zeroing spin at the
wall stops the heading from curling straight back into it.

The heading is f64 and free running; `rewrap` folds it into (−π, π]
without changing sin, cos or either reflection.
*/

use std::f64::consts::{PI, TAU};

/// Heading revolutions per second at full spin.
pub const SPIN_TURNS_PER_SECOND: f64 = 10.0;

/// Which walls were hit on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
    pub ang: f64,
    pub speed: f32,
    pub spin: f32,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.0)
    }
}

impl CursorState {
    pub fn new(x: f32, y: f32, ang: f64) -> Self {
        let mut cursor = Self {
            x: 0.5,
            y: 0.5,
            ang,
            speed: 0.0,
            spin: 0.0,
        };
        cursor.set_position(x, y);
        cursor
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Move the cursor directly. Coordinates are clamped into the square;
    /// non-finite ones leave that axis where it was.
    pub fn set_position(&mut self, x: f32, y: f32) {
        if x.is_finite() {
            self.x = x.clamp(0.0, 1.0);
        }
        if y.is_finite() {
            self.y = y.clamp(0.0, 1.0);
        }
    }

    /// Integrate one sample of motion.
    #[inline]
    pub fn step(&mut self, speed: f32, spin: f32, sample_rate: f64) -> Reflection {
        self.speed = speed;
        self.spin = spin;

        self.ang += TAU * (SPIN_TURNS_PER_SECOND / sample_rate) * spin as f64;

        let dx = self.ang.sin() as f32;
        let dy = self.ang.cos() as f32;
        let stride = (1.0 / sample_rate) as f32 * speed * speed;
        self.x += dx * stride;
        self.y += dy * stride;

        let mut hit = Reflection::default();

        if self.x < 0.0 {
            self.x = 0.0;
            if dx < 0.0 {
                self.reflect_x();
                hit.x = true;
            }
        } else if self.x > 1.0 {
            self.x = 1.0;
            if dx > 0.0 {
                self.reflect_x();
                hit.x = true;
            }
        }

        if self.y < 0.0 {
            self.y = 0.0;
            if dy < 0.0 {
                self.reflect_y();
                hit.y = true;
            }
        } else if self.y > 1.0 {
            self.y = 1.0;
            if dy > 0.0 {
                self.reflect_y();
                hit.y = true;
            }
        }

        hit
    }

    #[inline]
    fn reflect_x(&mut self) {
        self.ang = -self.ang;
        self.spin = 0.0;
    }

    #[inline]
    fn reflect_y(&mut self) {
        self.ang = -PI - self.ang;
        self.spin = 0.0;
    }

    /// Fold the heading into (−π, π].
    pub fn rewrap(&mut self) {
        let wrapped = self.ang.rem_euclid(TAU);
        self.ang = if wrapped > PI { wrapped - TAU } else { wrapped };
    }
}
