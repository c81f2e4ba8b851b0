//! Heightmap configuration.

use serde::{Deserialize, Serialize};

use super::bias::HeightmapBias;
use crate::noise::FractalNoiseConfig;

/// Configuration for the base heightmap pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightmapConfig {
    /// Landmass bias strategy.
    pub bias: HeightmapBias,
    /// Elevation noise.
    pub noise: FractalNoiseConfig,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            bias: HeightmapBias::default(),
            noise: FractalNoiseConfig::heightmap(),
        }
    }
}

impl HeightmapConfig {
    pub fn with_bias(bias: HeightmapBias) -> Self {
        Self {
            bias,
            ..Self::default()
        }
    }
}
