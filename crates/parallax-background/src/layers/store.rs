//! Structure-of-arrays layer table

use rand::Rng;

use super::{LayerIndex, LayerParams, LayerPatch, MAX_LAYERS};
use crate::math::{lerp, Rgb};
use crate::palette::Palette;
use crate::sink::{names, ParamValue};

/// Range new liquid phases are drawn from
pub(crate) const LIQUID_OFFSET_RANGE: std::ops::Range<f32> = 0.0..10.0;

/// Range liquid rates are seeded from at construction
const LIQUID_SPEED_RANGE: std::ops::Range<f32> = 0.5..1.5;

/// Fixed-capacity table of per-layer parameters
///
/// Capacity is chosen at construction and never changes. The active layer
/// count only tells the shader how many leading layers to draw; layers past
/// it keep their values.
#[derive(Clone, Debug)]
pub struct LayerStore {
    capacity: usize,
    layer_count: usize,
    sky_layer: Option<LayerIndex>,
    speed: Vec<f32>,
    offset: Vec<f32>,
    tint: Vec<Rgb>,
    opacity: Vec<f32>,
    freq: Vec<f32>,
    base: Vec<f32>,
    amp: Vec<f32>,
    height_offset: Vec<f32>,
    segment_count: Vec<f32>,
    segment_width: Vec<f32>,
    segment_width_noise: Vec<f32>,
    height_noise: Vec<f32>,
    smoothness: Vec<f32>,
    liquid_speed: Vec<f32>,
    liquid_offset: Vec<f32>,
}

/// Borrowed view of every channel, handed to the parameter sink in one go
#[derive(Clone, Copy, Debug)]
pub struct LayerChannels<'a> {
    pub speed: &'a [f32],
    pub offset: &'a [f32],
    pub tint: &'a [Rgb],
    pub opacity: &'a [f32],
    pub freq: &'a [f32],
    pub base: &'a [f32],
    pub amp: &'a [f32],
    pub height_offset: &'a [f32],
    pub segment_count: &'a [f32],
    pub segment_width: &'a [f32],
    pub segment_width_noise: &'a [f32],
    pub height_noise: &'a [f32],
    pub smoothness: &'a [f32],
    pub liquid_speed: &'a [f32],
    pub liquid_offset: &'a [f32],
}

impl<'a> LayerChannels<'a> {
    /// Every channel paired with its shader parameter name
    pub fn entries(&self) -> [(&'static str, ParamValue<'a>); 15] {
        [
            (names::SPEED, ParamValue::Floats(self.speed)),
            (names::OFFSET, ParamValue::Floats(self.offset)),
            (names::TINT, ParamValue::Colors(self.tint)),
            (names::OPACITY, ParamValue::Floats(self.opacity)),
            (names::FREQ, ParamValue::Floats(self.freq)),
            (names::BASE, ParamValue::Floats(self.base)),
            (names::AMP, ParamValue::Floats(self.amp)),
            (names::HEIGHT_OFFSET, ParamValue::Floats(self.height_offset)),
            (names::SEGMENT_COUNT, ParamValue::Floats(self.segment_count)),
            (names::SEGMENT_WIDTH, ParamValue::Floats(self.segment_width)),
            (names::SEGMENT_WIDTH_NOISE, ParamValue::Floats(self.segment_width_noise)),
            (names::HEIGHT_NOISE, ParamValue::Floats(self.height_noise)),
            (names::SMOOTHNESS, ParamValue::Floats(self.smoothness)),
            (names::LIQUID_SPEED, ParamValue::Floats(self.liquid_speed)),
            (names::LIQUID_OFFSET, ParamValue::Floats(self.liquid_offset)),
        ]
    }
}

impl LayerStore {
    /// Create a store with `capacity` layers (clamped to `1..=MAX_LAYERS`)
    ///
    /// All layers start invisible (opacity 0). Shape defaults are
    /// interpolated from near to far so an unconfigured stack still reads
    /// as a depth gradient: frequency rises while base and amplitude fall.
    /// Liquid rate and phase are seeded from `rng`.
    pub fn new<R: Rng + ?Sized>(capacity: usize, rng: &mut R) -> Self {
        let capacity = capacity.clamp(1, MAX_LAYERS);
        let ramp = |from: f32, to: f32| -> Vec<f32> {
            (0..capacity)
                .map(|i| {
                    let t = if capacity > 1 {
                        i as f32 / (capacity - 1) as f32
                    } else {
                        0.0
                    };
                    lerp(from, to, t)
                })
                .collect()
        };

        Self {
            capacity,
            layer_count: 0,
            sky_layer: None,
            speed: vec![0.0; capacity],
            offset: vec![0.0; capacity],
            tint: vec![Rgb::WHITE; capacity],
            opacity: vec![0.0; capacity],
            freq: ramp(0.7, 2.0),
            base: ramp(0.35, 0.18),
            amp: ramp(0.35, 0.22),
            height_offset: vec![0.0; capacity],
            segment_count: vec![1.0; capacity],
            segment_width: vec![0.3; capacity],
            segment_width_noise: vec![0.2; capacity],
            height_noise: vec![0.08; capacity],
            smoothness: vec![0.1; capacity],
            liquid_speed: (0..capacity).map(|_| rng.gen_range(LIQUID_SPEED_RANGE)).collect(),
            liquid_offset: (0..capacity).map(|_| rng.gen_range(LIQUID_OFFSET_RANGE)).collect(),
        }
    }

    /// Fixed number of layers
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Validate a raw index against this store
    #[inline]
    pub fn index(&self, raw: i32) -> Option<LayerIndex> {
        LayerIndex::checked(raw, self.capacity)
    }

    /// Merge a sparse patch into one layer
    pub fn apply(&mut self, index: LayerIndex, patch: &LayerPatch) {
        let i = index.get();
        if i >= self.capacity {
            return;
        }
        let set = |slot: &mut f32, value: Option<f32>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        set(&mut self.speed[i], patch.speed);
        set(&mut self.offset[i], patch.offset);
        if let Some(tint) = patch.tint {
            self.tint[i] = tint;
        }
        set(&mut self.opacity[i], patch.opacity);
        set(&mut self.freq[i], patch.freq);
        set(&mut self.base[i], patch.base);
        set(&mut self.amp[i], patch.amp);
        set(&mut self.height_offset[i], patch.height_offset);
        set(&mut self.segment_count[i], patch.segment_count);
        set(&mut self.segment_width[i], patch.segment_width);
        set(&mut self.segment_width_noise[i], patch.segment_width_noise);
        set(&mut self.height_noise[i], patch.height_noise);
        set(&mut self.smoothness[i], patch.smoothness);
        set(&mut self.liquid_speed[i], patch.liquid_speed);
        set(&mut self.liquid_offset[i], patch.liquid_offset);
    }

    /// Merge a patch using a raw index; out-of-range indices are ignored
    pub fn set_layer(&mut self, raw: i32, patch: &LayerPatch) {
        if let Some(index) = self.index(raw) {
            self.apply(index, patch);
        }
    }

    /// Read back one layer
    pub fn layer(&self, index: LayerIndex) -> Option<LayerParams> {
        let i = index.get();
        if i >= self.capacity {
            return None;
        }
        Some(LayerParams {
            speed: self.speed[i],
            offset: self.offset[i],
            tint: self.tint[i],
            opacity: self.opacity[i],
            freq: self.freq[i],
            base: self.base[i],
            amp: self.amp[i],
            height_offset: self.height_offset[i],
            segment_count: self.segment_count[i],
            segment_width: self.segment_width[i],
            segment_width_noise: self.segment_width_noise[i],
            height_noise: self.height_noise[i],
            smoothness: self.smoothness[i],
            liquid_speed: self.liquid_speed[i],
            liquid_offset: self.liquid_offset[i],
        })
    }

    /// Every layer in index order
    pub fn layers(&self) -> Vec<LayerParams> {
        LayerIndex::all(self.capacity)
            .filter_map(|index| self.layer(index))
            .collect()
    }

    /// Set how many leading layers are drawn, clamped to `[0, capacity]`
    ///
    /// Returns the stored count.
    pub fn set_layer_count(&mut self, n: i32) -> usize {
        self.layer_count = n.clamp(0, self.capacity as i32) as usize;
        self.layer_count
    }

    /// Number of layers the shader treats as active
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Select the sky layer; negative or out-of-range means none
    pub fn set_sky_layer(&mut self, raw: i32) {
        self.sky_layer = self.index(raw);
    }

    /// Selected sky layer
    #[inline]
    pub fn sky_layer(&self) -> Option<LayerIndex> {
        self.sky_layer
    }

    /// Sky layer in the form the shader expects (`-1` for none)
    pub fn sky_layer_raw(&self) -> i32 {
        self.sky_layer.map_or(-1, LayerIndex::as_i32)
    }

    /// Zero every layer's scroll phase and liquid phase
    ///
    /// Rates are untouched; only phases restart.
    pub fn zero_phases(&mut self) {
        self.offset.iter_mut().for_each(|v| *v = 0.0);
        self.liquid_offset.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Scale each liquid rate by a random factor within `±spread`
    pub fn jitter_liquid_speeds<R: Rng + ?Sized>(&mut self, rng: &mut R, spread: f32) {
        for speed in &mut self.liquid_speed {
            *speed *= 1.0 + rng.gen_range(-spread..=spread);
        }
    }

    /// Draw one fresh liquid phase per layer in `[0, 10)`
    pub fn draw_liquid_offsets<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f32> {
        (0..self.capacity)
            .map(|_| rng.gen_range(LIQUID_OFFSET_RANGE))
            .collect()
    }

    /// Overwrite the leading liquid phases; `None` entries are skipped
    pub fn set_liquid_offsets(&mut self, offsets: &[Option<f32>]) {
        for (slot, value) in self.liquid_offset.iter_mut().zip(offsets) {
            if let Some(v) = value {
                *slot = *v;
            }
        }
    }

    /// Assign a palette's colors to the leading layers' tints
    ///
    /// Returns how many layers were recolored.
    pub fn apply_palette(&mut self, palette: &Palette) -> usize {
        let mut applied = 0;
        for (slot, color) in self.tint.iter_mut().zip(palette.colors()) {
            *slot = color;
            applied += 1;
        }
        applied
    }

    /// Bulk view of every channel
    pub fn channels(&self) -> LayerChannels<'_> {
        LayerChannels {
            speed: &self.speed,
            offset: &self.offset,
            tint: &self.tint,
            opacity: &self.opacity,
            freq: &self.freq,
            base: &self.base,
            amp: &self.amp,
            height_offset: &self.height_offset,
            segment_count: &self.segment_count,
            segment_width: &self.segment_width,
            segment_width_noise: &self.segment_width_noise,
            height_noise: &self.height_noise,
            smoothness: &self.smoothness,
            liquid_speed: &self.liquid_speed,
            liquid_offset: &self.liquid_offset,
        }
    }
}
