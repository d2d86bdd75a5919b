//! Background engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `layers`: Layer edits, presets, copy/paste
//! - `speed`: Main and secondary rate controls
//! - `reset`: Fade-to-black reset sessions
//! - `frame`: Per-frame update and parameter push
//! - `persist`: Snapshot save/restore

mod frame;
mod layers;
mod persist;
mod reset;
mod speed;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::SimulationClock;
use crate::config::BackgroundConfig;
use crate::layers::{presets, LayerPatch, LayerStore};
use crate::lights::{LightProvider, LightSample, LightSynchronizer};
use crate::sink::{names, ParamSink, ParamValue};
use crate::transition::{FadeTiming, ResetSession};

/// Callback run during a reset, while the screen is black
pub type ResetCallback = Box<dyn FnMut()>;

/// Background engine
///
/// Owns the layer table, the simulation clock, the light synchronizer and
/// the reset state machine, and is the only thing that writes to the
/// parameter sink. Everything runs on the caller's thread from
/// [`update_time`](Self::update_time) and the setter methods.
pub struct BackgroundEngine<S, L> {
    pub(crate) store: LayerStore,
    pub(crate) clock: SimulationClock,
    pub(crate) lights: LightSynchronizer<L>,
    pub(crate) sink: S,
    /// Running reset session, if any
    pub(crate) reset: Option<ResetSession>,
    /// Timing used for the next session
    pub(crate) fade_timing: FadeTiming,
    /// Optional owner callback (single slot, last registration wins)
    pub(crate) on_reset: Option<ResetCallback>,
    pub(crate) rng: StdRng,
    pub(crate) resolution: [f32; 2],
    /// Wall-clock time of the previous update
    pub(crate) last_update: Option<f64>,
    /// Layer copied with `copy_layer`
    pub(crate) clipboard: Option<LayerPatch>,
}

impl<S: ParamSink, L: LightProvider> BackgroundEngine<S, L> {
    /// Create an engine from a config, a parameter sink and a light provider
    ///
    /// The initial parameter set is pushed to the sink immediately.
    pub fn new(config: BackgroundConfig, sink: S, lights: L) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = LayerStore::new(config.effective_capacity(), &mut rng);

        let mut clock = SimulationClock::new();
        clock.set_rate(config.main_rate);
        clock.set_secondary_rate(config.secondary_rate);

        let mut engine = Self {
            store,
            clock,
            lights: LightSynchronizer::new(lights),
            sink,
            reset: None,
            fade_timing: FadeTiming::new(config.fade.fade_in, config.fade.black, config.fade.fade_out),
            on_reset: None,
            rng,
            resolution: config.resolution,
            last_update: None,
            clipboard: None,
        };

        engine.set_layer_count(config.layer_count);
        engine.set_sky_layer(config.sky_layer);
        if config.apply_presets {
            engine.apply_presets();
        }

        log::debug!(
            "background engine created: {} layers, {} active",
            engine.store.capacity(),
            engine.store.layer_count()
        );
        engine.push_frame();
        engine
    }

    /// Update the output resolution; safe at any time, including mid-reset
    pub fn resize(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
        self.sink
            .set_param(names::RESOLUTION, ParamValue::Vec2(self.resolution));
    }

    /// Current output resolution
    #[inline]
    pub fn resolution(&self) -> [f32; 2] {
        self.resolution
    }

    /// Number of layers (fixed)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Read-only view of the layer table
    #[inline]
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// Read-only view of the simulation clock
    #[inline]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Current simulation time
    #[inline]
    pub fn simulation_time(&self) -> f64 {
        self.clock.time()
    }

    /// Light values pushed with the last frame
    #[inline]
    pub fn light_sample(&self) -> LightSample {
        self.lights.last()
    }

    /// Mutable access to the light provider
    pub fn light_provider_mut(&mut self) -> &mut L {
        self.lights.provider_mut()
    }

    /// The parameter sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the parameter sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Apply the showcase stack to the leading layers
    pub fn apply_presets(&mut self) {
        for (i, patch) in presets::showcase().iter().enumerate() {
            self.write_layer(i as i32, patch);
        }
    }
}
