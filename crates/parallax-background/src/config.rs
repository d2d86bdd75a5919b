//! Construction-time settings

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::layers::{DEFAULT_CAPACITY, MAX_LAYERS};
use crate::transition::FadeTiming;

/// Settings the engine is built from
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundConfig {
    /// Number of layers (fixed for the engine's lifetime)
    pub capacity: usize,
    /// Leading layers drawn initially
    pub layer_count: i32,
    /// Sky layer index, `-1` for none
    pub sky_layer: i32,
    /// Simulation time multiplier (negative values count as 0)
    pub main_rate: f64,
    /// Liquid motion multiplier (negative values count as 0)
    pub secondary_rate: f64,
    /// Reset fade timing
    pub fade: FadeTiming,
    /// Output size in pixels
    pub resolution: [f32; 2],
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Apply the showcase stack after construction
    pub apply_presets: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            layer_count: 10,
            sky_layer: 0,
            main_rate: 1.0,
            secondary_rate: 1.0,
            fade: FadeTiming::default(),
            resolution: [1920.0, 1080.0],
            seed: None,
            apply_presets: false,
        }
    }
}

impl BackgroundConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Capacity clamped to what the uniform block can hold
    pub fn effective_capacity(&self) -> usize {
        self.capacity.clamp(1, MAX_LAYERS)
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same config with a different capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Errors loading a configuration
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Invalid background config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackgroundConfig::default();
        assert_eq!(config.capacity, 15);
        assert_eq!(config.layer_count, 10);
        assert_eq!(config.sky_layer, 0);
        assert_eq!(config.fade, FadeTiming::default());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config = BackgroundConfig::from_json(
            r#"{"capacity": 8, "fade": {"black": 2.0}, "seed": 42}"#,
        )
        .unwrap();
        assert_eq!(config.capacity, 8);
        assert_eq!(config.seed, Some(42));
        assert!((config.fade.black - 2.0).abs() < 1e-9);
        assert!((config.fade.fade_in - 1.0).abs() < 1e-9);
        assert_eq!(config.layer_count, 10);
    }

    #[test]
    fn test_invalid_json() {
        let err = BackgroundConfig::from_json(r#"{"capacity": "many"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid background config"));
    }

    #[test]
    fn test_effective_capacity() {
        assert_eq!(BackgroundConfig::default().with_capacity(0).effective_capacity(), 1);
        assert_eq!(BackgroundConfig::default().with_capacity(64).effective_capacity(), MAX_LAYERS);
    }
}
