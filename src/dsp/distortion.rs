//! Waveshapers for the reference drive effect.

/*
Every shaper has the form `output = f(input * drive)`. Near drive 1 the
signal stays in the linear part of `f`; push it harder and the curve bends,
adding harmonics.

Soft clip:
  f(x) = x / (1 + |x|)
  - Smooth, never exceeds ±1

Foldback:
  Past ±t the signal is mirrored back into range, as many times as it
  takes. Computed as a triangle wave of period 4t so the cost does not
  depend on how hot the input is.

     t ┤  ╱╲    ╱╲
       │ ╱  ╲  ╱  ╲
    -t ┤╱    ╲╱    ╲
       └────────────── x
*/

#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    let x = sample * drive;
    x / (1.0 + x.abs())
}

/// Foldback distortion. Output always lies in `[-threshold, threshold]`;
/// a non-positive threshold or non-finite input gives silence.
#[inline]
pub fn foldback(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    if !(threshold > 0.0) || !x.is_finite() {
        return 0.0;
    }
    if x.abs() <= threshold {
        return x;
    }
    let period = 4.0 * threshold;
    let u = (x + threshold).rem_euclid(period);
    let folded = if u < 2.0 * threshold {
        u - threshold
    } else {
        3.0 * threshold - u
    };
    folded.clamp(-threshold, threshold)
}
