//! Passes that reshape an existing heightmap.

use crate::error::GenerationError;
use crate::grid::{normalize, Grid};
use crate::noise::{sample_noise_field, FractalNoiseConfig, NoiseEngine};
use crate::pipeline::Generator;
use crate::world::{HeightCell, HeightWorld};

const RIDGE_LAYER: &str = "mountain_ridge";
const BASE_WEIGHT: f32 = 0.7;
const RIDGE_WEIGHT: f32 = 0.3;

/// Sharpens mountains by blending ridged noise into the heightmap.
///
/// The ridge signal is weighted by the existing elevation, so lowlands stay
/// comparatively flat while high ground picks up crests.
#[derive(Debug, Clone)]
pub struct RidgedFractalMountainGenerator {
    pub noise: FractalNoiseConfig,
}

impl Default for RidgedFractalMountainGenerator {
    fn default() -> Self {
        Self {
            noise: FractalNoiseConfig::ridge(),
        }
    }
}

impl RidgedFractalMountainGenerator {
    pub fn new(noise: FractalNoiseConfig) -> Self {
        Self { noise }
    }

    /// Normalized `|noise|`; zero crossings of the raw noise become the ridges.
    fn ridge_field(&self, seed: u64, width: usize, height: usize) -> Result<Grid, GenerationError> {
        let engine = NoiseEngine::for_layer(seed, RIDGE_LAYER);
        let raw = sample_noise_field(&engine, width, height, &self.noise);
        let folded = Grid::from_fn(width, height, |x, y| raw.get(x, y).abs());
        Ok(normalize(&folded)?)
    }
}

impl<W> Generator<W> for RidgedFractalMountainGenerator
where
    W: HeightWorld,
    W::Cell: HeightCell,
{
    fn name(&self) -> &str {
        "Ridged Fractal Mountain Generator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        self.noise.validate()?;

        let (width, height) = (world.width(), world.height());
        let max_elevation = world.max_elevation();
        let ridges = self.ridge_field(world.seed(), width, height)?;

        let blended = Grid::from_fn(width, height, |x, y| {
            let ridge = 1.0 - (ridges.get(x, y) - 0.2) * 1.25;
            let percent = world.cell(x, y).height() / max_elevation;
            BASE_WEIGHT * percent + RIDGE_WEIGHT * ridge * (0.5 + percent / 2.0)
        });
        let blended = normalize(&blended)?;

        for y in 0..height {
            for x in 0..width {
                world.cell_mut(x, y).set_height(max_elevation * blended.get(x, y));
            }
        }
        Ok(())
    }
}

/// Flattens lowlands and steepens peaks with a cubic curve above sea level.
///
/// Cells below sea level are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct MountainHeightmapAdjuster;

impl MountainHeightmapAdjuster {
    /// Maps one elevation through the curve.
    pub fn adjust(height: f32, max_elevation: f32, sea_level: f32) -> f32 {
        let raw = height / max_elevation;
        let sea = sea_level / max_elevation;
        let adjusted = if raw < sea {
            raw
        } else {
            sea + (raw - sea).powi(3) * 2.0
        };
        adjusted * max_elevation
    }
}

impl<W> Generator<W> for MountainHeightmapAdjuster
where
    W: HeightWorld,
    W::Cell: HeightCell,
{
    fn name(&self) -> &str {
        "Mountain Heightmap Adjuster"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        let max_elevation = world.max_elevation();
        let sea_level = world.sea_level();
        for y in 0..world.height() {
            for x in 0..world.width() {
                let cell = world.cell_mut(x, y);
                cell.set_height(Self::adjust(cell.height(), max_elevation, sea_level));
            }
        }
        Ok(())
    }
}
