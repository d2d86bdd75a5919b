//! Bounds-checked layer index

use serde::{Deserialize, Serialize};

/// Index of a layer, guaranteed to be below the capacity it was checked against
///
/// Raw indices arrive as signed integers from control surfaces (where `-1`
/// means "none"), so construction goes through [`LayerIndex::checked`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerIndex(usize);

impl LayerIndex {
    /// Validate a raw index against a capacity
    ///
    /// Returns `None` for negative indices and indices `>= capacity`.
    #[inline]
    pub fn checked(raw: i32, capacity: usize) -> Option<Self> {
        if raw < 0 {
            return None;
        }
        let index = raw as usize;
        (index < capacity).then_some(Self(index))
    }

    /// Position in the channel arrays
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Signed form, as pushed to the rendering program
    #[inline]
    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }

    /// All indices below `capacity`
    pub fn all(capacity: usize) -> impl Iterator<Item = LayerIndex> {
        (0..capacity).map(LayerIndex)
    }
}
