//! Noise-based rainfall passes.

use super::config::ClimateConfig;
use super::ocean_bias::OceanBiaser;
use super::wind::mid_latitude_bias;
use crate::error::GenerationError;
use crate::grid::{normalize, Grid};
use crate::noise::{sample_noise_field, FractalNoiseConfig, NoiseEngine};
use crate::pipeline::Generator;
use crate::world::{CellAddress, HeightCell, HeightWorld, RainfallCell, World};

pub(crate) const RAIN_LAYER: &str = "rain";

/// Share of the final rainfall taken from the simulated field; the rest
/// comes from the ocean bias.
pub(crate) const RAIN_WEIGHT: f32 = 0.8;

/// Writes normalized noise straight into every cell's rainfall.
#[derive(Debug, Clone)]
pub struct SimplexRainGenerator {
    pub noise: FractalNoiseConfig,
}

impl Default for SimplexRainGenerator {
    fn default() -> Self {
        Self {
            noise: FractalNoiseConfig::rainfall(),
        }
    }
}

impl SimplexRainGenerator {
    pub fn new(noise: FractalNoiseConfig) -> Self {
        Self { noise }
    }
}

impl<W> Generator<W> for SimplexRainGenerator
where
    W: World,
    W::Cell: RainfallCell,
{
    fn name(&self) -> &str {
        "Simplex Rain Generator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        self.noise.validate()?;

        let engine = NoiseEngine::for_layer(world.seed(), RAIN_LAYER);
        let rain = sample_noise_field(&engine, world.width(), world.height(), &self.noise).normalized()?;

        for y in 0..world.height() {
            for x in 0..world.width() {
                world.cell_mut(x, y).set_rainfall(rain.get(x, y));
            }
        }
        Ok(())
    }
}

/// Noise weighted toward the mid-latitudes, softened by ocean proximity.
///
/// Only land cells are written; ocean cells keep whatever rainfall they had.
#[derive(Debug, Clone)]
pub struct BiasedNoiseRainGenerator {
    pub noise: FractalNoiseConfig,
    pub ocean_bias_block_size: usize,
}

impl Default for BiasedNoiseRainGenerator {
    fn default() -> Self {
        Self::from_config(&ClimateConfig::default())
    }
}

impl BiasedNoiseRainGenerator {
    pub fn from_config(config: &ClimateConfig) -> Self {
        Self {
            noise: config.rainfall_noise.clone(),
            ocean_bias_block_size: config.ocean_bias_block_size,
        }
    }
}

impl<W> Generator<W> for BiasedNoiseRainGenerator
where
    W: HeightWorld,
    W::Cell: HeightCell + RainfallCell,
{
    fn name(&self) -> &str {
        "Biased Noise Rain Generator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        self.noise.validate()?;

        let (width, height) = (world.width(), world.height());
        let biaser = OceanBiaser::new(world, self.ocean_bias_block_size);
        let engine = NoiseEngine::for_layer(world.seed(), RAIN_LAYER);
        let noise = sample_noise_field(&engine, width, height, &self.noise);

        let weighted = Grid::from_fn(width, height, |x, y| noise.get(x, y) * mid_latitude_bias(y, height));
        let rain = normalize(&weighted)?;

        for y in 0..height {
            for x in 0..width {
                if world.is_ocean(x, y) {
                    continue;
                }
                let bias = biaser.bias_at(CellAddress::new(x as i32, y as i32));
                let value = RAIN_WEIGHT * rain.get(x, y) + (1.0 - RAIN_WEIGHT) * bias;
                world.cell_mut(x, y).set_rainfall(value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridWorld;

    #[test]
    fn test_simplex_rain_spans_unit_range() {
        let mut world: GridWorld = GridWorld::new(64, 32, 8, 100.0, 50.0);
        SimplexRainGenerator::default().run_generation(&mut world).unwrap();
        let (min, max) = world.rainfall_field().min_max().unwrap();
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_simplex_rain_is_deterministic() {
        let run = |seed| {
            let mut world: GridWorld = GridWorld::new(32, 32, seed, 100.0, 50.0);
            SimplexRainGenerator::default().run_generation(&mut world).unwrap();
            world.rainfall_field()
        };
        assert_eq!(run(4), run(4));
        assert_ne!(run(4), run(5));
    }

    #[test]
    fn test_biased_rain_skips_ocean() {
        let mut world: GridWorld = GridWorld::new(80, 60, 12, 100.0, 50.0);
        world.fill_heights(|x, _| if x < 30 { 20.0 } else { 70.0 });
        for (x, y) in world.coords().collect::<Vec<_>>() {
            world.cell_mut(x, y).set_rainfall(-1.0);
        }

        BiasedNoiseRainGenerator::default().run_generation(&mut world).unwrap();

        for (x, y) in world.coords() {
            let rain = world.cell(x, y).rainfall;
            if x < 30 {
                assert_eq!(rain, -1.0);
            } else {
                assert!((0.0..=1.0 + 1e-6).contains(&rain), "rain {rain} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_biased_rain_leans_on_ocean_bias() {
        // A one-cell island inside a sampled ocean block takes most of its
        // non-noise share from the surrounding sea.
        let mut world: GridWorld = GridWorld::new(50, 50, 3, 100.0, 50.0);
        world.fill_heights(|x, y| if (x, y) == (5, 5) { 90.0 } else { 10.0 });
        BiasedNoiseRainGenerator::default().run_generation(&mut world).unwrap();
        assert!(world.cell(5, 5).rainfall >= 0.2 * (624.0 / 625.0) - 1e-6);
    }
}
