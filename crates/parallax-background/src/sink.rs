//! Parameter push channel to the rendering program
//!
//! The engine never talks to a GPU API directly. Every frame it pushes a
//! named set of values through a [`ParamSink`]; implementations decide how
//! they reach the shader (a packed uniform block, a WebGL program, or a
//! recording map in tests).

use std::collections::HashMap;

use crate::math::Rgb;

/// Parameter names understood by the background shader
pub mod names {
    pub const TIME: &str = "uTime";
    pub const RESOLUTION: &str = "uResolution";
    pub const LAYER_COUNT: &str = "uLayerCount";
    pub const SKY_LAYER: &str = "uSkyLayer";
    pub const SPEED: &str = "uSpeed";
    pub const OFFSET: &str = "uOffset";
    pub const TINT: &str = "uTint";
    pub const OPACITY: &str = "uOpacity";
    pub const FREQ: &str = "uFreq";
    pub const BASE: &str = "uBase";
    pub const AMP: &str = "uAmp";
    pub const HEIGHT_OFFSET: &str = "uHeightOffset";
    pub const SEGMENT_COUNT: &str = "uSegmentCount";
    pub const SEGMENT_WIDTH: &str = "uSegmentWidth";
    pub const SEGMENT_WIDTH_NOISE: &str = "uSegmentWidthNoise";
    pub const HEIGHT_NOISE: &str = "uHeightNoise";
    pub const SMOOTHNESS: &str = "uSmoothness";
    pub const LIQUID_SPEED: &str = "uLiquidSpeed";
    pub const LIQUID_OFFSET: &str = "uLiquidOffset";
    pub const LIQUID_RATE: &str = "uLiquidRate";
    pub const SKY_PHASE: &str = "uSkyPhase";
    pub const FADE: &str = "uFade";
    pub const DIR_LIGHT_POS: &str = "uDirLightPos";
    pub const DIR_LIGHT_COLOR: &str = "uDirLightColor";
    pub const POINT_LIGHT_POS: &str = "uPointLightPos";
    pub const POINT_LIGHT_COLOR: &str = "uPointLightColor";
    pub const AMBIENT_COLOR: &str = "uAmbientColor";
}

/// A value pushed to the rendering program
///
/// Array variants borrow the engine's storage so a frame push never copies
/// the layer table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue<'a> {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Floats(&'a [f32]),
    Colors(&'a [Rgb]),
}

/// Owned copy of a parameter, as read back from a sink
#[derive(Clone, Debug, PartialEq)]
pub enum StoredParam {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Floats(Vec<f32>),
    Colors(Vec<Rgb>),
}

impl StoredParam {
    /// Scalar value, if this is a float
    pub fn as_float(&self) -> Option<f32> {
        match self {
            StoredParam::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value, if this is an int
    pub fn as_int(&self) -> Option<i32> {
        match self {
            StoredParam::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float array, if this is one
    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            StoredParam::Floats(v) => Some(v),
            _ => None,
        }
    }
}

impl From<ParamValue<'_>> for StoredParam {
    fn from(value: ParamValue<'_>) -> Self {
        match value {
            ParamValue::Float(v) => StoredParam::Float(v),
            ParamValue::Int(v) => StoredParam::Int(v),
            ParamValue::Vec2(v) => StoredParam::Vec2(v),
            ParamValue::Vec3(v) => StoredParam::Vec3(v),
            ParamValue::Vec4(v) => StoredParam::Vec4(v),
            ParamValue::Floats(v) => StoredParam::Floats(v.to_vec()),
            ParamValue::Colors(v) => StoredParam::Colors(v.to_vec()),
        }
    }
}

/// Destination for named shader parameters
pub trait ParamSink {
    /// Set one named parameter
    ///
    /// Unknown names are ignored by implementations that only carry a fixed
    /// parameter set.
    fn set_param(&mut self, name: &str, value: ParamValue<'_>);

    /// Read back the current value of a parameter
    fn param(&self, name: &str) -> Option<StoredParam>;

    /// Called once after all parameters of a frame have been set
    fn flush(&mut self) {}
}

/// Sink that keeps every pushed value in a map
///
/// Used where no rendering context exists (tests, headless hosts).
#[derive(Debug, Default)]
pub struct RecordingSink {
    params: HashMap<String, StoredParam>,
    flushes: u64,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed frame pushes
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Number of distinct parameters seen so far
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Scalar shortcut for tests and tools
    pub fn float(&self, name: &str) -> Option<f32> {
        self.params.get(name).and_then(StoredParam::as_float)
    }
}

impl ParamSink for RecordingSink {
    fn set_param(&mut self, name: &str, value: ParamValue<'_>) {
        self.params.insert(name.to_string(), value.into());
    }

    fn param(&self, name: &str) -> Option<StoredParam> {
        self.params.get(name).cloned()
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

impl<S: ParamSink + ?Sized> ParamSink for Box<S> {
    fn set_param(&mut self, name: &str, value: ParamValue<'_>) {
        (**self).set_param(name, value)
    }

    fn param(&self, name: &str) -> Option<StoredParam> {
        (**self).param(name)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_stores_values() {
        let mut sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.set_param(names::TIME, ParamValue::Float(1.5));
        sink.set_param(names::LAYER_COUNT, ParamValue::Int(4));
        sink.set_param(names::SPEED, ParamValue::Floats(&[0.1, 0.2]));

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.float(names::TIME), Some(1.5));
        assert_eq!(sink.param(names::LAYER_COUNT).and_then(|p| p.as_int()), Some(4));
        assert_eq!(
            sink.param(names::SPEED),
            Some(StoredParam::Floats(vec![0.1, 0.2]))
        );
        assert_eq!(sink.param("uMissing"), None);
    }

    #[test]
    fn test_recording_sink_overwrites() {
        let mut sink = RecordingSink::new();
        sink.set_param(names::FADE, ParamValue::Float(0.0));
        sink.set_param(names::FADE, ParamValue::Float(1.0));
        assert_eq!(sink.float(names::FADE), Some(1.0));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_flush_counts_frames() {
        let mut sink = RecordingSink::new();
        sink.flush();
        sink.flush();
        assert_eq!(sink.flush_count(), 2);
    }

    #[test]
    fn test_stored_param_accessors() {
        assert_eq!(StoredParam::Float(2.0).as_float(), Some(2.0));
        assert_eq!(StoredParam::Int(2).as_float(), None);
        assert_eq!(StoredParam::Floats(vec![1.0]).as_floats(), Some(&[1.0][..]));
    }
}
