//! Ready-made layer configurations

use rand::Rng;

use super::LayerPatch;
use crate::math::Rgb;

/// Record a single layer is restored to by "reset layer"
pub fn layer_default() -> LayerPatch {
    LayerPatch::new()
        .tint_hex(0x404e5c)
        .speed(1.0)
        .opacity(1.0)
        .freq(1.0)
        .base(0.5)
        .amp(0.5)
        .height_offset(0.0)
        .segment_count(20.0)
        .segment_width(0.3)
        .segment_width_noise(0.2)
        .height_noise(0.8)
        .smoothness(0.1)
}

/// Random shape, motion and tint for one layer
///
/// Scroll phase and liquid channels are left alone.
pub fn randomized<R: Rng + ?Sized>(rng: &mut R) -> LayerPatch {
    LayerPatch::new()
        .tint(Rgb::from_hex(rng.gen_range(0..=0xffffff)))
        .speed(rng.gen_range(0.0..3.0))
        .opacity(rng.gen_range(0.5..1.0))
        .freq(rng.gen_range(0.5..2.5))
        .base(rng.gen_range(0.0..1.5))
        .amp(rng.gen_range(0.0..1.0))
        .height_offset(rng.gen_range(-1.0..1.0))
        .segment_count(rng.gen_range(5.0..55.0))
        .segment_width(rng.gen_range(0.1..0.9))
        .segment_width_noise(rng.gen_range(0.0..0.5))
        .height_noise(rng.gen_range(0.3..1.3))
        .smoothness(rng.gen_range(0.0..0.8))
}

/// Thirteen-layer tuned stack, nearest layer first
///
/// The first and last two entries leave the segment fields unset and keep
/// whatever the layer already had.
pub fn showcase() -> Vec<LayerPatch> {
    let segmented = |tint: u32, speed: f32, freq: f32, base: f32, amp: f32, height_offset: f32| {
        LayerPatch::new()
            .tint_hex(tint)
            .speed(speed)
            .opacity(1.0)
            .freq(freq)
            .base(base)
            .amp(amp)
            .height_offset(height_offset)
            .segment_count(20.0)
            .segment_width(0.3)
            .segment_width_noise(0.2)
            .height_noise(0.08)
            .smoothness(1.0)
    };

    vec![
        LayerPatch::new()
            .tint_hex(0x1c99ce)
            .speed(0.6)
            .opacity(1.0)
            .freq(0.5)
            .base(0.4)
            .amp(1.0)
            .height_offset(-0.1)
            .height_noise(0.08)
            .smoothness(1.0),
        segmented(0x00fffb, 0.7, 1.0, 0.5, 0.24, 0.02),
        segmented(0xff0099, 0.8, 1.0, 0.5, 0.5, -0.05),
        segmented(0x000080, 0.9, 1.0, 0.4, 0.5, 0.0),
        segmented(0xff0000, 1.0, 1.0, 0.5, 0.5, -0.15),
        segmented(0x40e0d0, 1.1, 1.0, 0.5, 0.5, -0.2),
        segmented(0x00ced1, 1.2, 1.0, 0.5, 0.5, -0.24),
        segmented(0x20b2aa, 1.3, 1.2, 0.4, 0.3, -0.12),
        segmented(0xff0099, 1.7, 1.2, 0.4, 0.3, -0.35),
        segmented(0x00ffaa, 1.9, 1.8, 0.8, 0.3, -0.6),
        segmented(0x00ffaa, 2.1, 1.8, 0.22, 0.22, -0.05),
        LayerPatch::new()
            .tint_hex(0x4fab8c)
            .speed(1.2)
            .opacity(0.9)
            .freq(0.6)
            .base(0.34)
            .amp(0.32)
            .height_offset(-0.26)
            .height_noise(0.08)
            .smoothness(1.3),
        LayerPatch::new()
            .tint_hex(0x43f9d5)
            .speed(1.5)
            .opacity(0.9)
            .freq(0.3)
            .base(0.4)
            .amp(0.3)
            .height_offset(-0.45)
            .height_noise(0.06)
            .smoothness(1.1),
    ]
}
