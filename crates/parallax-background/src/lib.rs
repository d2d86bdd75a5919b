//! Layered Parallax Background
//!
//! This crate drives a procedural, multi-layer parallax background:
//! - Per-layer shape, motion and tint parameters
//! - A rate-scaled, resettable simulation clock
//! - Light state copied into shading parameters every frame
//! - A fade-to-black reset that reseeds motion and recolors the layers
//!
//! ## Architecture
//!
//! - [`math`]: `Vec3` and `Rgb` value types
//! - [`layers`]: Structure-of-arrays layer table and presets
//! - [`clock`]: Simulation time accumulator
//! - [`lights`]: Light provider seam and per-frame synchronizer
//! - [`transition`]: Reset state machine and easing
//! - [`sink`]: Named parameter push channel to the rendering program
//! - [`uniforms`]: Packed uniform block implementing the sink
//! - [`persistence`]: Snapshot save/load
//!
//! ## Example
//!
//! ```rust
//! use parallax_background::{BackgroundConfig, BackgroundEngine, LayerPatch, LightRig, RecordingSink};
//!
//! let mut engine = BackgroundEngine::new(
//!     BackgroundConfig::default().with_capacity(8),
//!     RecordingSink::new(),
//!     LightRig::default(),
//! );
//! engine.set_layer(0, &LayerPatch::new().tint_hex(0x1c99ce).opacity(1.0));
//! engine.update_time(0.0);
//! engine.update_time(0.016);
//! engine.force_reset();
//! ```

pub mod clock;
pub mod config;
pub mod layers;
pub mod lights;
pub mod math;
pub mod palette;
pub mod persistence;
pub mod sink;
pub mod transition;
pub mod uniforms;

mod engine;

// GPU upload (only available with "gpu" feature)
#[cfg(feature = "gpu")]
pub mod gpu;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use clock::SimulationClock;
pub use config::{BackgroundConfig, ConfigError};
pub use layers::{LayerIndex, LayerParams, LayerPatch, LayerStore, MAX_LAYERS};
pub use lights::{
    AmbientDescriptor, LightDescriptor, LightProvider, LightRig, LightSample, LightSynchronizer,
};
pub use math::{Rgb, Vec3};
pub use palette::Palette;
pub use persistence::{Snapshot, SnapshotError};
pub use sink::{ParamSink, ParamValue, RecordingSink, StoredParam};
pub use transition::{FadeTiming, ResetPhase};
pub use uniforms::{BackgroundUniforms, UniformBlockSink};

pub use engine::{BackgroundEngine, ResetCallback};
