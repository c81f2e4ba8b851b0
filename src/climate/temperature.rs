//! Latitude-driven temperature.

use super::config::ClimateConfig;
use super::ocean_bias::OceanBiaser;
use crate::error::GenerationError;
use crate::noise::{sample_noise_field, FractalNoiseConfig, NoiseEngine};
use crate::pipeline::Generator;
use crate::world::{CellAddress, HeightCell, HeightWorld, TemperatureCell};

const TEMPERATURE_LAYER: &str = "temperature";

/// Weight of the latitude baseline against the noise.
const LATITUDE_WEIGHT: f32 = 0.8;
/// How much full ocean exposure cools a cell.
const OCEAN_COOLING: f32 = 0.3;

/// Hot equator, cold poles, perturbed by noise and cooled near the ocean.
#[derive(Debug, Clone)]
pub struct TemperatureGenerator {
    pub noise: FractalNoiseConfig,
    pub ocean_bias_block_size: usize,
}

impl Default for TemperatureGenerator {
    fn default() -> Self {
        Self::from_config(&ClimateConfig::default())
    }
}

impl TemperatureGenerator {
    pub fn from_config(config: &ClimateConfig) -> Self {
        Self {
            noise: config.temperature_noise.clone(),
            ocean_bias_block_size: config.ocean_bias_block_size,
        }
    }

    /// Triangular baseline: 0 at the poles, 1 at the equator row.
    pub fn latitude_baseline(y: usize, height: usize) -> f32 {
        let from_pole = if y > height / 2 { height - y } else { y };
        from_pole as f32 / height as f32 * 2.0
    }
}

impl<W> Generator<W> for TemperatureGenerator
where
    W: HeightWorld,
    W::Cell: HeightCell + TemperatureCell,
{
    fn name(&self) -> &str {
        "Temperature Generator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        self.noise.validate()?;

        let (width, height) = (world.width(), world.height());
        let biaser = OceanBiaser::new(world, self.ocean_bias_block_size);
        let engine = NoiseEngine::for_layer(world.seed(), TEMPERATURE_LAYER);
        let noise = sample_noise_field(&engine, width, height, &self.noise).normalized()?;

        for y in 0..height {
            let baseline = Self::latitude_baseline(y, height);
            for x in 0..width {
                let bias = biaser.bias_at(CellAddress::new(x as i32, y as i32));
                let cooling = 1.0 - OCEAN_COOLING * bias;
                let temperature =
                    (LATITUDE_WEIGHT * baseline + (1.0 - LATITUDE_WEIGHT) * noise.get(x, y)) * cooling;
                world.cell_mut(x, y).set_temperature(temperature);
            }
        }
        Ok(())
    }
}
