//! Sparse layer updates and full layer records

use serde::{Deserialize, Serialize};

use crate::math::Rgb;

/// Sparse update for one layer
///
/// Only fields that are `Some` are written; everything else on the layer is
/// left untouched. Values are stored as given, never clamped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amp: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_offset: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_count: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_width_noise: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_noise: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquid_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquid_offset: Option<f32>,
}

impl LayerPatch {
    /// Empty patch (applying it changes nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn speed(mut self, v: f32) -> Self {
        self.speed = Some(v);
        self
    }

    pub fn offset(mut self, v: f32) -> Self {
        self.offset = Some(v);
        self
    }

    pub fn tint(mut self, v: Rgb) -> Self {
        self.tint = Some(v);
        self
    }

    /// Tint from a packed `0xRRGGBB` value
    pub fn tint_hex(self, hex: u32) -> Self {
        self.tint(Rgb::from_hex(hex))
    }

    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn freq(mut self, v: f32) -> Self {
        self.freq = Some(v);
        self
    }

    pub fn base(mut self, v: f32) -> Self {
        self.base = Some(v);
        self
    }

    pub fn amp(mut self, v: f32) -> Self {
        self.amp = Some(v);
        self
    }

    pub fn height_offset(mut self, v: f32) -> Self {
        self.height_offset = Some(v);
        self
    }

    pub fn segment_count(mut self, v: f32) -> Self {
        self.segment_count = Some(v);
        self
    }

    pub fn segment_width(mut self, v: f32) -> Self {
        self.segment_width = Some(v);
        self
    }

    pub fn segment_width_noise(mut self, v: f32) -> Self {
        self.segment_width_noise = Some(v);
        self
    }

    pub fn height_noise(mut self, v: f32) -> Self {
        self.height_noise = Some(v);
        self
    }

    pub fn smoothness(mut self, v: f32) -> Self {
        self.smoothness = Some(v);
        self
    }

    pub fn liquid_speed(mut self, v: f32) -> Self {
        self.liquid_speed = Some(v);
        self
    }

    pub fn liquid_offset(mut self, v: f32) -> Self {
        self.liquid_offset = Some(v);
        self
    }
}

/// Every channel of one layer, as read back from the store
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerParams {
    pub speed: f32,
    pub offset: f32,
    pub tint: Rgb,
    pub opacity: f32,
    pub freq: f32,
    pub base: f32,
    pub amp: f32,
    pub height_offset: f32,
    pub segment_count: f32,
    pub segment_width: f32,
    pub segment_width_noise: f32,
    pub height_noise: f32,
    pub smoothness: f32,
    pub liquid_speed: f32,
    pub liquid_offset: f32,
}

impl From<LayerParams> for LayerPatch {
    /// A patch that overwrites every channel
    fn from(p: LayerParams) -> Self {
        Self {
            speed: Some(p.speed),
            offset: Some(p.offset),
            tint: Some(p.tint),
            opacity: Some(p.opacity),
            freq: Some(p.freq),
            base: Some(p.base),
            amp: Some(p.amp),
            height_offset: Some(p.height_offset),
            segment_count: Some(p.segment_count),
            segment_width: Some(p.segment_width),
            segment_width_noise: Some(p.segment_width_noise),
            height_noise: Some(p.height_noise),
            smoothness: Some(p.smoothness),
            liquid_speed: Some(p.liquid_speed),
            liquid_offset: Some(p.liquid_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        assert!(LayerPatch::new().is_empty());
        assert!(!LayerPatch::new().opacity(0.5).is_empty());
    }

    #[test]
    fn test_builder_sets_only_named_fields() {
        let patch = LayerPatch::new().speed(0.6).tint_hex(0x1c99ce);
        assert_eq!(patch.speed, Some(0.6));
        assert_eq!(patch.tint, Some(Rgb::from_hex(0x1c99ce)));
        assert_eq!(patch.opacity, None);
        assert_eq!(patch.freq, None);
    }

    #[test]
    fn test_patch_json_is_sparse() {
        let patch = LayerPatch::new().opacity(1.0).height_offset(-0.1);
        let json = serde_json::to_string(&patch).unwrap();
        assert!(json.contains("\"opacity\""));
        assert!(json.contains("\"heightOffset\""));
        assert!(!json.contains("speed"));

        let parsed: LayerPatch = serde_json::from_str(r#"{"segmentCount": 20.0}"#).unwrap();
        assert_eq!(parsed, LayerPatch::new().segment_count(20.0));
    }
}
