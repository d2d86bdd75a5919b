//! Per-layer parameter storage
//!
//! Layers are stored as a structure of arrays: one contiguous `Vec` per
//! channel, indexed by layer. This mirrors how the rendering program
//! consumes them (one uniform array per attribute) and lets the whole set
//! be handed over in one call through [`LayerChannels`].
//!
//! - [`LayerIndex`]: index validated against a store's capacity
//! - [`LayerPatch`]: sparse update, only `Some` fields are written
//! - [`LayerParams`]: full read-back record for one layer
//! - [`LayerStore`]: the table itself

mod index;
mod patch;
mod store;
pub mod presets;

pub use index::LayerIndex;
pub use patch::{LayerParams, LayerPatch};
pub use store::{LayerChannels, LayerStore};

/// Largest layer capacity the uniform block can carry
pub const MAX_LAYERS: usize = 16;

/// Default layer capacity
pub const DEFAULT_CAPACITY: usize = 15;
