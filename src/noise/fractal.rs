//! Multi-octave fractal noise parameters and field sampling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::simplex::NoiseEngine;
use crate::error::ConfigError;
use crate::grid::Grid;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalNoiseConfig {
    /// Number of noise layers summed together.
    pub octaves: u32,
    /// Divisor applied to cell coordinates; larger values give larger features.
    pub scale: f32,
    /// Amplitude of the first layer.
    pub amplitude: f32,
    /// Coordinate multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Amplitude multiplier per octave (below 1.0).
    pub persistence: f32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 1,
            scale: 25.0,
            amplitude: 0.5,
            lacunarity: 2.0,
            persistence: 0.9,
        }
    }
}

impl FractalNoiseConfig {
    /// Base elevation noise.
    pub fn heightmap() -> Self {
        Self {
            octaves: 6,
            scale: 120.0,
            amplitude: 0.5,
            lacunarity: 2.0,
            persistence: 0.4,
        }
    }

    /// Coarse noise used to seed random continent/island bias grids.
    pub fn bias_grid() -> Self {
        Self {
            octaves: 1,
            scale: 3.0,
            amplitude: 0.5,
            lacunarity: 2.0,
            persistence: 0.9,
        }
    }

    /// Single wide layer for ridged mountains.
    pub fn ridge() -> Self {
        Self {
            octaves: 1,
            scale: 250.0,
            amplitude: 0.5,
            lacunarity: 2.0,
            persistence: 0.4,
        }
    }

    pub fn temperature() -> Self {
        Self {
            octaves: 3,
            scale: 100.0,
            amplitude: 0.5,
            lacunarity: 2.0,
            persistence: 0.4,
        }
    }

    pub fn rainfall() -> Self {
        Self {
            octaves: 3,
            scale: 75.0,
            amplitude: 0.5,
            lacunarity: 2.0,
            persistence: 0.4,
        }
    }

    /// Rejects parameters that cannot produce a usable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "octaves",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "scale",
                reason: format!("{} is not a positive number", self.scale),
            });
        }
        if !(self.amplitude.is_finite() && self.lacunarity.is_finite() && self.persistence.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "amplitude",
                reason: "amplitude, lacunarity and persistence must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Samples `engine` at every cell of a `width` x `height` field on the z = 0 plane.
///
/// Cells are independent, so sampling runs in parallel; the result does not
/// depend on scheduling.
pub fn sample_noise_field(
    engine: &NoiseEngine,
    width: usize,
    height: usize,
    config: &FractalNoiseConfig,
) -> Grid {
    let values: Vec<f32> = (0..width * height)
        .into_par_iter()
        .map(|i| {
            let x = (i % width) as f32;
            let y = (i / width) as f32;
            engine.coherent_noise(x, y, 0.0, config)
        })
        .collect();

    Grid::from_values(width, height, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 1);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.9);
    }

    #[test]
    fn test_validate() {
        assert!(FractalNoiseConfig::heightmap().validate().is_ok());
        let flat = FractalNoiseConfig {
            scale: 0.0,
            ..FractalNoiseConfig::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(ConfigError::InvalidParameter { name: "scale", .. })
        ));
        let silent = FractalNoiseConfig {
            octaves: 0,
            ..FractalNoiseConfig::default()
        };
        assert!(silent.validate().is_err());
    }

    #[test]
    fn test_field_matches_point_sampling() {
        let engine = NoiseEngine::new(5);
        let config = FractalNoiseConfig::temperature();
        let field = sample_noise_field(&engine, 16, 9, &config);

        assert_eq!(field.width(), 16);
        assert_eq!(field.height(), 9);
        for (x, y) in [(0, 0), (15, 8), (7, 3)] {
            let single = engine.coherent_noise(x as f32, y as f32, 0.0, &config);
            assert_eq!(field.get(x, y), single);
        }
    }

    #[test]
    fn test_field_reproducibility() {
        let config = FractalNoiseConfig::heightmap();
        let a = sample_noise_field(&NoiseEngine::new(77), 32, 32, &config);
        let b = sample_noise_field(&NoiseEngine::new(77), 32, 32, &config);
        assert_eq!(a, b);
    }
}
