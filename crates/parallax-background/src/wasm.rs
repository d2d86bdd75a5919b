//! WASM exports for the parallax background
//!
//! Wraps a [`BackgroundEngine`] writing into a packed uniform block, so the
//! page only has to upload `uniform_bytes()` to its own GL/WebGPU program.

use std::sync::Once;

use wasm_bindgen::prelude::*;

use crate::config::BackgroundConfig;
use crate::engine::BackgroundEngine;
use crate::layers::LayerPatch;
use crate::lights::LightRig;
use crate::math::{Rgb, Vec3};
use crate::persistence::Snapshot;
use crate::uniforms::UniformBlockSink;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

static LOGGER: Once = Once::new();

fn init_logging() {
    LOGGER.call_once(|| {
        console_log::init_with_level(log::Level::Info).ok();
    });
}

/// Wall-clock seconds, high resolution where available
fn now_secs() -> f64 {
    let millis = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(date_now);
    millis / 1000.0
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Background controller for WASM - wraps BackgroundEngine with a JS-friendly API
#[wasm_bindgen]
pub struct BackgroundController {
    engine: BackgroundEngine<UniformBlockSink, LightRig>,
}

#[wasm_bindgen]
impl BackgroundController {
    /// Create a controller with the default config
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::build(BackgroundConfig::default())
    }

    /// Create a controller from a JSON config (camelCase keys, all optional)
    #[wasm_bindgen]
    pub fn with_config(json: &str) -> Result<BackgroundController, JsValue> {
        let config = BackgroundConfig::from_json(json).map_err(js_err)?;
        Ok(Self::build(config))
    }

    fn build(config: BackgroundConfig) -> Self {
        init_logging();
        let sink = UniformBlockSink::new(config.resolution[0], config.resolution[1]);
        Self {
            engine: BackgroundEngine::new(config, sink, LightRig::default()),
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance one frame using the page clock
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.engine.update_time(now_secs());
    }

    /// Advance one frame at an explicit timestamp in milliseconds
    #[wasm_bindgen]
    pub fn update(&mut self, now_ms: f64) {
        self.engine.update_time(now_ms / 1000.0);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(width, height);
    }

    /// Packed uniform block, ready for upload
    #[wasm_bindgen]
    pub fn uniform_bytes(&mut self) -> Vec<u8> {
        let bytes = self.engine.sink().block().as_bytes().to_vec();
        self.engine.sink_mut().mark_clean();
        bytes
    }

    /// True if the block changed since the last `uniform_bytes()`
    #[wasm_bindgen]
    pub fn uniforms_dirty(&self) -> bool {
        self.engine.sink().is_dirty()
    }

    #[wasm_bindgen]
    pub fn simulation_time(&self) -> f64 {
        self.engine.simulation_time()
    }

    // =========================================================================
    // Layers
    // =========================================================================

    /// Merge a JSON patch (camelCase keys, tint as `{r, g, b}` in 0..1) into one layer
    #[wasm_bindgen]
    pub fn set_layer(&mut self, index: i32, patch_json: &str) -> Result<(), JsValue> {
        let patch: LayerPatch = serde_json::from_str(patch_json).map_err(js_err)?;
        self.engine.set_layer(index, &patch);
        Ok(())
    }

    /// Set one layer's tint from `#rrggbb`
    #[wasm_bindgen]
    pub fn set_layer_tint(&mut self, index: i32, color: &str) -> Result<(), JsValue> {
        let tint = Rgb::parse(color)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid color: {}", color)))?;
        self.engine.set_layer(index, &LayerPatch::new().tint(tint));
        Ok(())
    }

    /// Layer as JSON, or `null` for an invalid index
    #[wasm_bindgen]
    pub fn get_layer_json(&self, index: i32) -> String {
        serde_json::to_string(&self.engine.layer(index)).unwrap_or_else(|_| "null".to_string())
    }

    #[wasm_bindgen]
    pub fn get_layers_json(&self) -> String {
        serde_json::to_string(&self.engine.layers()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn set_layer_count(&mut self, n: i32) {
        self.engine.set_layer_count(n);
    }

    #[wasm_bindgen]
    pub fn layer_count(&self) -> u32 {
        self.engine.layer_count() as u32
    }

    #[wasm_bindgen]
    pub fn set_sky_layer(&mut self, index: i32) {
        self.engine.set_sky_layer(index);
    }

    #[wasm_bindgen]
    pub fn sky_layer(&self) -> i32 {
        self.engine.sky_layer()
    }

    #[wasm_bindgen]
    pub fn reset_layer(&mut self, index: i32) {
        self.engine.reset_layer(index);
    }

    #[wasm_bindgen]
    pub fn randomize_layer(&mut self, index: i32) {
        self.engine.randomize_layer(index);
    }

    #[wasm_bindgen]
    pub fn copy_layer(&mut self, index: i32) {
        self.engine.copy_layer(index);
    }

    #[wasm_bindgen]
    pub fn paste_layer(&mut self, index: i32) {
        self.engine.paste_layer(index);
    }

    #[wasm_bindgen]
    pub fn apply_presets(&mut self) {
        self.engine.apply_presets();
    }

    // =========================================================================
    // Speed
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_main_rate(&mut self, rate: f64) {
        self.engine.set_main_rate(rate);
    }

    #[wasm_bindgen]
    pub fn main_rate(&self) -> f64 {
        self.engine.main_rate()
    }

    #[wasm_bindgen]
    pub fn set_secondary_rate(&mut self, rate: f64) {
        self.engine.set_secondary_rate(rate);
    }

    #[wasm_bindgen]
    pub fn secondary_rate(&self) -> f64 {
        self.engine.secondary_rate()
    }

    #[wasm_bindgen]
    pub fn pause_main(&mut self) {
        self.engine.pause_main();
    }

    #[wasm_bindgen]
    pub fn resume_main(&mut self) {
        self.engine.resume_main();
    }

    #[wasm_bindgen]
    pub fn pause_secondary(&mut self) {
        self.engine.pause_secondary();
    }

    #[wasm_bindgen]
    pub fn resume_secondary(&mut self) {
        self.engine.resume_secondary();
    }

    // =========================================================================
    // Reset
    // =========================================================================

    #[wasm_bindgen]
    pub fn force_reset(&mut self) {
        self.engine.force_reset();
    }

    #[wasm_bindgen]
    pub fn is_resetting(&self) -> bool {
        self.engine.is_resetting()
    }

    #[wasm_bindgen]
    pub fn fade_amount(&self) -> f32 {
        self.engine.fade_amount()
    }

    #[wasm_bindgen]
    pub fn reset_phase(&self) -> String {
        self.engine.reset_phase().id().to_string()
    }

    /// Durations in seconds; negative values count as zero
    #[wasm_bindgen]
    pub fn set_fade_timing(&mut self, fade_in: f64, black: f64, fade_out: f64) {
        self.engine.set_fade_timing(fade_in, black, fade_out);
    }

    /// Register a JS function run at the midpoint of every reset
    ///
    /// The function runs inside `tick()`/`update()` while this controller is
    /// borrowed, so it must not call back into the controller. Defer such
    /// work (e.g. with `queueMicrotask`) instead.
    #[wasm_bindgen]
    pub fn set_reset_callback(&mut self, callback: js_sys::Function) {
        self.engine.set_external_reset_callback(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::warn!("reset callback threw: {:?}", e);
            }
        });
    }

    #[wasm_bindgen]
    pub fn clear_reset_callback(&mut self) {
        self.engine.clear_external_reset_callback();
    }

    // =========================================================================
    // Lights
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_key_light(&mut self, x: f32, y: f32, z: f32, color: u32, intensity: f32) {
        let key = &mut self.engine.light_provider_mut().key;
        key.position = Vec3::new(x, y, z);
        key.color = Rgb::from_hex(color);
        key.intensity = intensity;
    }

    #[wasm_bindgen]
    pub fn set_fill_light(&mut self, x: f32, y: f32, z: f32, color: u32, intensity: f32) {
        let fill = &mut self.engine.light_provider_mut().fill;
        fill.position = Vec3::new(x, y, z);
        fill.color = Rgb::from_hex(color);
        fill.intensity = intensity;
    }

    #[wasm_bindgen]
    pub fn set_ambient_light(&mut self, color: u32, intensity: f32) {
        let ambient = &mut self.engine.light_provider_mut().ambient;
        ambient.color = Rgb::from_hex(color);
        ambient.intensity = intensity;
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[wasm_bindgen]
    pub fn save_snapshot(&self) -> Result<String, JsValue> {
        self.engine.snapshot().to_json().map_err(js_err)
    }

    #[wasm_bindgen]
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot = Snapshot::from_json(json).map_err(js_err)?;
        self.engine.restore(&snapshot);
        Ok(())
    }

    /// Summary of the controller state as JSON
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> String {
        let timing = self.engine.fade_timing();
        serde_json::to_string(&serde_json::json!({
            "time": self.engine.simulation_time(),
            "layerCount": self.engine.layer_count(),
            "skyLayer": self.engine.sky_layer(),
            "mainRate": self.engine.main_rate(),
            "secondaryRate": self.engine.secondary_rate(),
            "resetting": self.engine.is_resetting(),
            "resetPhase": self.engine.reset_phase().id(),
            "fade": self.engine.fade_amount(),
            "fadeTiming": {
                "fadeIn": timing.fade_in,
                "black": timing.black,
                "fadeOut": timing.fade_out
            },
            "resolution": self.engine.resolution()
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for BackgroundController {
    fn default() -> Self {
        Self::new()
    }
}
