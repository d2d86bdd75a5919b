//! Easing functions for fades

/// Hermite smoothstep, `t² (3 − 2t)`, with `t` clamped to 0..1
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Progress of `elapsed` through `duration`, clamped to 0..1
///
/// A zero (or negative) duration is already complete.
#[inline]
pub fn progress(elapsed: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0) as f32
}
