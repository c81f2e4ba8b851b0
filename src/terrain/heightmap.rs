//! Base elevation from biased fractal noise.

use log::debug;

use super::config::HeightmapConfig;
use crate::error::GenerationError;
use crate::grid::Grid;
use crate::noise::{sample_noise_field, NoiseEngine};
use crate::pipeline::Generator;
use crate::world::{HeightCell, HeightWorld};

pub(crate) const HEIGHT_LAYER: &str = "height";
pub(crate) const HEIGHT_BIAS_LAYER: &str = "height_bias";

/// Generates elevation as `max_elevation * noise * bias`.
///
/// The noise field is normalized first, so with no bias the highest cell
/// sits exactly at `max_elevation` and the lowest at zero.
#[derive(Debug, Clone, Default)]
pub struct SimplexHeightmapGenerator {
    pub config: HeightmapConfig,
}

impl SimplexHeightmapGenerator {
    pub fn new(config: HeightmapConfig) -> Self {
        Self { config }
    }

    /// Computes the elevation field for a `width` x `height` world without
    /// touching any world.
    pub fn elevation_field(
        &self,
        seed: u64,
        width: usize,
        height: usize,
        max_elevation: f32,
    ) -> Result<Grid, GenerationError> {
        self.config.noise.validate()?;

        let engine = NoiseEngine::for_layer(seed, HEIGHT_LAYER);
        let noise = sample_noise_field(&engine, width, height, &self.config.noise).normalized()?;

        let bias_engine = NoiseEngine::for_layer(seed, HEIGHT_BIAS_LAYER);
        let bias = self.config.bias.expanded(&bias_engine, width, height)?;

        Ok(Grid::from_fn(width, height, |x, y| {
            max_elevation * noise.get(x, y) * bias.get(x, y)
        }))
    }
}

impl<W> Generator<W> for SimplexHeightmapGenerator
where
    W: HeightWorld,
    W::Cell: HeightCell,
{
    fn name(&self) -> &str {
        "Simplex Heightmap Generator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        debug!("heightmap bias: {}", self.config.bias);
        let field = self.elevation_field(world.seed(), world.width(), world.height(), world.max_elevation())?;
        super::store_heights(world, &field);
        Ok(())
    }
}
