//! Parameter snapshots for save/load
//!
//! Where the blob is stored is up to the host; this module only turns the
//! engine state into JSON and back.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotError};
