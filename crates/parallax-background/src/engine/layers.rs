//! Layer edits

use super::BackgroundEngine;
use crate::layers::{presets, LayerParams, LayerPatch};
use crate::lights::LightProvider;
use crate::sink::ParamSink;

impl<S: ParamSink, L: LightProvider> BackgroundEngine<S, L> {
    /// Merge a sparse patch into layer `index`
    ///
    /// Indices outside `0..capacity` are ignored.
    pub fn set_layer(&mut self, index: i32, patch: &LayerPatch) {
        self.write_layer(index, patch);
    }

    /// Read back layer `index`
    pub fn layer(&self, index: i32) -> Option<LayerParams> {
        self.store.index(index).and_then(|i| self.store.layer(i))
    }

    /// Every layer in index order
    pub fn layers(&self) -> Vec<LayerParams> {
        self.store.layers()
    }

    /// Set how many leading layers are drawn, clamped to `[0, capacity]`
    pub fn set_layer_count(&mut self, n: i32) {
        let stored = self.store.set_layer_count(n);
        if stored as i64 != n as i64 {
            log::debug!("layer count {} clamped to {}", n, stored);
        }
    }

    /// Number of layers drawn
    pub fn layer_count(&self) -> usize {
        self.store.layer_count()
    }

    /// Select the sky layer (`-1` for none)
    pub fn set_sky_layer(&mut self, index: i32) {
        self.store.set_sky_layer(index);
    }

    /// Selected sky layer, `-1` for none
    pub fn sky_layer(&self) -> i32 {
        self.store.sky_layer_raw()
    }

    /// Restore one layer's shape, motion and tint to the stock values
    pub fn reset_layer(&mut self, index: i32) {
        self.write_layer(index, &presets::layer_default());
    }

    /// Give one layer a random shape, motion and tint
    pub fn randomize_layer(&mut self, index: i32) {
        if self.store.index(index).is_none() {
            return;
        }
        let patch = presets::randomized(&mut self.rng);
        self.write_layer(index, &patch);
    }

    /// Remember layer `index` for a later [`paste_layer`](Self::paste_layer)
    ///
    /// Phases and liquid channels are not copied.
    pub fn copy_layer(&mut self, index: i32) {
        if let Some(params) = self.layer(index) {
            self.clipboard = Some(LayerPatch {
                offset: None,
                liquid_speed: None,
                liquid_offset: None,
                ..LayerPatch::from(params)
            });
        }
    }

    /// Apply the copied layer to `index`; no-op with an empty clipboard
    pub fn paste_layer(&mut self, index: i32) {
        if let Some(patch) = self.clipboard.clone() {
            self.write_layer(index, &patch);
        }
    }

    /// True if a layer has been copied
    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Merge a patch, keeping an explicit liquid phase over one staged by
    /// a running reset
    pub(crate) fn write_layer(&mut self, index: i32, patch: &LayerPatch) {
        let Some(layer) = self.store.index(index) else {
            return;
        };
        self.store.apply(layer, patch);
        if patch.liquid_offset.is_some() {
            if let Some(session) = self.reset.as_mut() {
                session.discard_staged_liquid_offset(layer.get());
            }
        }
    }
}
