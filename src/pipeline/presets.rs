//! Ready-made pipeline assembly.

use log::debug;
use serde::{Deserialize, Serialize};

use super::stage::WorldGenerator;
use crate::biomes::{BiomeSelector, PhysicalTemplate};
use crate::climate::{
    AirflowRainSimulator, BiasedNoiseRainGenerator, ClimateConfig, PointOceanRainGenerator, RainfallModel,
    SimplexRainGenerator, TemperatureGenerator,
};
use crate::error::ConfigError;
use crate::rivers::{RiverConfig, SimpleRiverSimulator};
use crate::terrain::{
    HeightmapConfig, MountainHeightmapAdjuster, RidgedFractalMountainGenerator, SimplexHeightmapGenerator,
};
use crate::world::{BiomeCell, HeightCell, HeightWorld, RainfallCell, RiverCell, RiverWorld, TemperatureCell};

/// Everything needed to assemble the standard pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub heightmap: HeightmapConfig,
    /// Run the ridged mountain pass after the base heightmap.
    pub ridged_mountains: bool,
    /// Run the cubic mountain adjuster after the heightmap passes.
    pub adjust_mountains: bool,
    pub climate: ClimateConfig,
    pub rainfall: RainfallModel,
    pub rivers: RiverConfig,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            heightmap: HeightmapConfig::default(),
            ridged_mountains: true,
            adjust_mountains: true,
            climate: ClimateConfig::default(),
            rainfall: RainfallModel::default(),
            rivers: RiverConfig::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heightmap.noise.validate()?;
        self.climate.validate()?;
        self.rivers.validate()
    }
}

/// Builds heightmap, optional mountain passes, temperature, the configured
/// rainfall model, rivers and biomes, in that order.
///
/// The configuration is validated before anything is assembled.
pub fn standard_pipeline<W, T, B>(
    config: &WorldGenConfig,
    template: T,
) -> Result<WorldGenerator<W>, ConfigError>
where
    W: HeightWorld + RiverWorld + 'static,
    W::Cell: HeightCell + TemperatureCell + RainfallCell + RiverCell + BiomeCell<B>,
    T: PhysicalTemplate<B> + 'static,
    B: 'static,
{
    config.validate()?;

    let mut pipeline = WorldGenerator::new();
    pipeline.add_generator(SimplexHeightmapGenerator::new(config.heightmap.clone()));
    if config.ridged_mountains {
        pipeline.add_generator(RidgedFractalMountainGenerator::default());
    }
    if config.adjust_mountains {
        pipeline.add_generator(MountainHeightmapAdjuster);
    }

    pipeline.add_generator(TemperatureGenerator::from_config(&config.climate));
    match config.rainfall {
        RainfallModel::Noise => {
            pipeline.add_generator(BiasedNoiseRainGenerator::from_config(&config.climate));
        }
        RainfallModel::Simplex => {
            pipeline.add_generator(SimplexRainGenerator::new(config.climate.rainfall_noise.clone()));
        }
        RainfallModel::PointOcean => {
            pipeline.add_generator(PointOceanRainGenerator::new(config.climate.point_ocean_size));
        }
        RainfallModel::Airflow => {
            pipeline.add_generator(AirflowRainSimulator::from_config(&config.climate));
        }
    }

    pipeline.add_generator(SimpleRiverSimulator::new(config.rivers.clone()));
    pipeline.add_generator(BiomeSelector::new(template));

    debug!(
        "standard pipeline: {} passes, {} bias, {} rainfall",
        pipeline.generator_count(),
        config.heightmap.bias,
        config.rainfall
    );
    Ok(pipeline)
}
