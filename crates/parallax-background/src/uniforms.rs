//! Packed uniform block for the background shader
//!
//! Per-layer scalar channels are packed four layers per `vec4` so each
//! array has a 16-byte stride as WGSL uniform arrays require.

use crate::layers::MAX_LAYERS;
use crate::math::Rgb;
use crate::sink::{names, ParamSink, ParamValue, StoredParam};

/// `vec4`s needed to pack one scalar channel
const PACKED: usize = MAX_LAYERS / 4;

/// Four layers per `vec4`
pub type PackedChannel = [[f32; 4]; PACKED];

/// Uniform data sent to the shader
/// NOTE: This struct must match WGSL alignment requirements!
/// Total struct size is 1280 bytes (multiple of 16).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniforms {
    pub time: f32,                       // offset 0
    pub layer_count: i32,                // offset 4
    pub sky_layer: i32,                  // offset 8
    pub fade: f32,                       // offset 12
    pub resolution: [f32; 2],            // offset 16
    pub liquid_rate: f32,                // offset 24
    pub _pad: f32,                       // offset 28
    pub sky_phase: [f32; 4],             // offset 32
    pub dir_light_pos: [f32; 4],         // offset 48
    pub dir_light_color: [f32; 4],       // offset 64
    pub point_light_pos: [f32; 4],       // offset 80
    pub point_light_color: [f32; 4],     // offset 96
    pub ambient_color: [f32; 4],         // offset 112
    pub speed: PackedChannel,            // offset 128
    pub offset: PackedChannel,           // offset 192
    pub opacity: PackedChannel,          // offset 256
    pub freq: PackedChannel,             // offset 320
    pub base: PackedChannel,             // offset 384
    pub amp: PackedChannel,              // offset 448
    pub height_offset: PackedChannel,    // offset 512
    pub segment_count: PackedChannel,    // offset 576
    pub segment_width: PackedChannel,    // offset 640
    pub segment_width_noise: PackedChannel, // offset 704
    pub height_noise: PackedChannel,     // offset 768
    pub smoothness: PackedChannel,       // offset 832
    pub liquid_speed: PackedChannel,     // offset 896
    pub liquid_offset: PackedChannel,    // offset 960
    pub tint: [[f32; 4]; MAX_LAYERS],    // offset 1024
}

impl BackgroundUniforms {
    /// Zeroed block with a resolution and no sky layer
    pub fn with_resolution(width: f32, height: f32) -> Self {
        Self {
            resolution: [width, height],
            sky_layer: -1,
            ..<Self as bytemuck::Zeroable>::zeroed()
        }
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut PackedChannel> {
        Some(match name {
            names::SPEED => &mut self.speed,
            names::OFFSET => &mut self.offset,
            names::OPACITY => &mut self.opacity,
            names::FREQ => &mut self.freq,
            names::BASE => &mut self.base,
            names::AMP => &mut self.amp,
            names::HEIGHT_OFFSET => &mut self.height_offset,
            names::SEGMENT_COUNT => &mut self.segment_count,
            names::SEGMENT_WIDTH => &mut self.segment_width,
            names::SEGMENT_WIDTH_NOISE => &mut self.segment_width_noise,
            names::HEIGHT_NOISE => &mut self.height_noise,
            names::SMOOTHNESS => &mut self.smoothness,
            names::LIQUID_SPEED => &mut self.liquid_speed,
            names::LIQUID_OFFSET => &mut self.liquid_offset,
            _ => return None,
        })
    }

    fn channel(&self, name: &str) -> Option<&PackedChannel> {
        Some(match name {
            names::SPEED => &self.speed,
            names::OFFSET => &self.offset,
            names::OPACITY => &self.opacity,
            names::FREQ => &self.freq,
            names::BASE => &self.base,
            names::AMP => &self.amp,
            names::HEIGHT_OFFSET => &self.height_offset,
            names::SEGMENT_COUNT => &self.segment_count,
            names::SEGMENT_WIDTH => &self.segment_width,
            names::SEGMENT_WIDTH_NOISE => &self.segment_width_noise,
            names::HEIGHT_NOISE => &self.height_noise,
            names::SMOOTHNESS => &self.smoothness,
            names::LIQUID_SPEED => &self.liquid_speed,
            names::LIQUID_OFFSET => &self.liquid_offset,
            _ => return None,
        })
    }

    fn vec4_mut(&mut self, name: &str) -> Option<&mut [f32; 4]> {
        Some(match name {
            names::SKY_PHASE => &mut self.sky_phase,
            names::DIR_LIGHT_POS => &mut self.dir_light_pos,
            names::DIR_LIGHT_COLOR => &mut self.dir_light_color,
            names::POINT_LIGHT_POS => &mut self.point_light_pos,
            names::POINT_LIGHT_COLOR => &mut self.point_light_color,
            names::AMBIENT_COLOR => &mut self.ambient_color,
            _ => return None,
        })
    }

    fn vec4(&self, name: &str) -> Option<[f32; 4]> {
        Some(match name {
            names::SKY_PHASE => self.sky_phase,
            names::DIR_LIGHT_POS => self.dir_light_pos,
            names::DIR_LIGHT_COLOR => self.dir_light_color,
            names::POINT_LIGHT_POS => self.point_light_pos,
            names::POINT_LIGHT_COLOR => self.point_light_color,
            names::AMBIENT_COLOR => self.ambient_color,
            _ => return None,
        })
    }
}

/// Write up to `MAX_LAYERS` values into a packed channel
fn pack(channel: &mut PackedChannel, values: &[f32]) {
    for (i, v) in values.iter().take(MAX_LAYERS).enumerate() {
        channel[i / 4][i % 4] = *v;
    }
}

/// Read the first `len` values back out of a packed channel
fn unpack(channel: &PackedChannel, len: usize) -> Vec<f32> {
    (0..len.min(MAX_LAYERS)).map(|i| channel[i / 4][i % 4]).collect()
}

/// Parameter sink that packs everything into a [`BackgroundUniforms`] block
#[derive(Clone, Debug)]
pub struct UniformBlockSink {
    block: BackgroundUniforms,
    /// Length of the last pushed layer arrays
    layers: usize,
    /// Set whenever a parameter changed since the block was last taken
    dirty: bool,
}

impl Default for UniformBlockSink {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl UniformBlockSink {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            block: BackgroundUniforms::with_resolution(width, height),
            layers: 0,
            dirty: true,
        }
    }

    /// The current block
    #[inline]
    pub fn block(&self) -> &BackgroundUniforms {
        &self.block
    }

    /// True if the block changed since [`mark_clean`](Self::mark_clean)
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the block as uploaded
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl ParamSink for UniformBlockSink {
    fn set_param(&mut self, name: &str, value: ParamValue<'_>) {
        let written = match (name, value) {
            (names::TIME, ParamValue::Float(v)) => {
                self.block.time = v;
                true
            }
            (names::FADE, ParamValue::Float(v)) => {
                self.block.fade = v;
                true
            }
            (names::LIQUID_RATE, ParamValue::Float(v)) => {
                self.block.liquid_rate = v;
                true
            }
            (names::LAYER_COUNT, ParamValue::Int(v)) => {
                self.block.layer_count = v;
                true
            }
            (names::SKY_LAYER, ParamValue::Int(v)) => {
                self.block.sky_layer = v;
                true
            }
            (names::RESOLUTION, ParamValue::Vec2(v)) => {
                self.block.resolution = v;
                true
            }
            (names::TINT, ParamValue::Colors(colors)) => {
                for (slot, c) in self.block.tint.iter_mut().zip(colors) {
                    *slot = [c.r, c.g, c.b, 1.0];
                }
                self.layers = colors.len().min(MAX_LAYERS);
                true
            }
            (name, ParamValue::Floats(values)) => match self.block.channel_mut(name) {
                Some(channel) => {
                    pack(channel, values);
                    self.layers = values.len().min(MAX_LAYERS);
                    true
                }
                None => false,
            },
            (name, ParamValue::Vec3([x, y, z])) => match self.block.vec4_mut(name) {
                Some(slot) => {
                    *slot = [x, y, z, 0.0];
                    true
                }
                None => false,
            },
            (name, ParamValue::Vec4(v)) => match self.block.vec4_mut(name) {
                Some(slot) => {
                    *slot = v;
                    true
                }
                None => false,
            },
            _ => false,
        };

        if written {
            self.dirty = true;
        } else {
            log::warn!("uniform block has no slot for {} = {:?}", name, value);
        }
    }

    fn param(&self, name: &str) -> Option<StoredParam> {
        let b = &self.block;
        match name {
            names::TIME => Some(StoredParam::Float(b.time)),
            names::FADE => Some(StoredParam::Float(b.fade)),
            names::LIQUID_RATE => Some(StoredParam::Float(b.liquid_rate)),
            names::LAYER_COUNT => Some(StoredParam::Int(b.layer_count)),
            names::SKY_LAYER => Some(StoredParam::Int(b.sky_layer)),
            names::RESOLUTION => Some(StoredParam::Vec2(b.resolution)),
            names::SKY_PHASE => Some(StoredParam::Vec4(b.sky_phase)),
            names::TINT => Some(StoredParam::Colors(
                b.tint[..self.layers]
                    .iter()
                    .map(|c| Rgb::new(c[0], c[1], c[2]))
                    .collect(),
            )),
            _ => {
                if let Some(channel) = b.channel(name) {
                    return Some(StoredParam::Floats(unpack(channel, self.layers)));
                }
                b.vec4(name).map(|[x, y, z, _]| StoredParam::Vec3([x, y, z]))
            }
        }
    }
}
