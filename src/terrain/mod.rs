//! Elevation passes.
//!
//! [`SimplexHeightmapGenerator`] lays down the base heightmap; the ridged
//! mountain generator and the mountain adjuster reshape whatever heightmap
//! the world already holds.

mod bias;
mod config;
mod heightmap;
mod mountains;

pub use bias::{
    expand_bias_grid, random_bias_grid, HeightmapBias, CONTINENTS_GRID_SIZE, ISLANDS_GRID_SIZE,
    RANDOM_BIAS_THRESHOLD,
};
pub use config::HeightmapConfig;
pub use heightmap::SimplexHeightmapGenerator;
pub use mountains::{MountainHeightmapAdjuster, RidgedFractalMountainGenerator};

use crate::grid::Grid;
use crate::world::{HeightCell, HeightWorld};

/// Writes `field` into the world's cell heights.
fn store_heights<W>(world: &mut W, field: &Grid)
where
    W: HeightWorld,
    W::Cell: HeightCell,
{
    for y in 0..world.height() {
        for x in 0..world.width() {
            world.cell_mut(x, y).set_height(field.get(x, y));
        }
    }
}
