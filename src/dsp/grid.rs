//! Bilinear morphing between four corner presets.
//!
//! ```text
//!   y=1  P01 ─────── P11
//!         │           │
//!         │   (x,y)   │
//!         │           │
//!   y=0  P00 ─────── P10
//!       x=0         x=1
//! ```
//!
//! One formula covers the whole square, so there is no seam between
//! quadrants. It has to run every sample because the cursor moves every
//! sample.

use crate::params::{FxGrid, FxParams, NR_PARAMS};

/// Corner weights in grid order: (0,0), (0,1), (1,1), (1,0).
#[inline]
pub fn weights(x: f32, y: f32) -> [f32; 4] {
    [
        (1.0 - x) * (1.0 - y),
        (1.0 - x) * y,
        x * y,
        x * (1.0 - y),
    ]
}

#[inline]
pub fn interpolate(grid: &FxGrid, x: f32, y: f32) -> FxParams {
    let w = weights(x, y);
    let mut params = [0.0; NR_PARAMS];
    for (i, param) in params.iter_mut().enumerate() {
        *param = w[0] * grid[0][i] + w[1] * grid[1][i] + w[2] * grid[2][i] + w[3] * grid[3][i];
    }
    params
}
