//! Fade-to-black reset transition
//!
//! A reset session dims the background to black, fires the reset side
//! effects while fully black, then fades back in.

mod easing;
mod reset;

pub use easing::{progress, smoothstep};
pub use reset::{FadeTiming, ResetEvent, ResetPhase, ResetSession};

/// Default fade-to-black duration in seconds
pub const DEFAULT_FADE_IN_SECS: f64 = 1.0;

/// Default fully-black hold in seconds (split around the reset)
pub const DEFAULT_BLACK_SECS: f64 = 0.5;

/// Default fade-from-black duration in seconds
pub const DEFAULT_FADE_OUT_SECS: f64 = 1.0;
