//! Small vector and color types shared by the layer store and the light rig
//!
//! Both types are plain `Copy` values laid out as `[f32; 3]` so they can be
//! handed to the uniform block without conversion.

mod color;
mod vec3;

pub use color::Rgb;
pub use vec3::Vec3;

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
