//! The world the passes operate on.
//!
//! Generators only see worlds through these capability traits, and each one
//! bounds its world and cell types by exactly what it reads and writes.
//! [`GridWorld`] is an in-memory implementation of all of them.

mod address;
mod grid_world;

pub use address::{find_center, CellAddress};
pub use grid_world::{Cell, GridWorld};

use crate::grid::Grid;
use crate::rivers::{RiverNetwork, SegmentId};

/// A rectangular grid of cells with a generation seed.
pub trait World {
    type Cell;

    fn seed(&self) -> u64;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Returns true if `(x, y)` addresses a cell.
    fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    fn cell(&self, x: usize, y: usize) -> &Self::Cell;

    fn cell_mut(&mut self, x: usize, y: usize) -> &mut Self::Cell;
}

/// A world with an elevation scale and a sea level.
pub trait HeightWorld: World {
    fn max_elevation(&self) -> f32;

    fn sea_level(&self) -> f32;

    /// Cells strictly below sea level are ocean.
    fn is_ocean(&self, x: usize, y: usize) -> bool
    where
        Self::Cell: HeightCell,
    {
        self.cell(x, y).height() < self.sea_level()
    }

    /// Copies every cell's height into a grid.
    fn height_field(&self) -> Grid
    where
        Self::Cell: HeightCell,
    {
        Grid::from_fn(self.width(), self.height(), |x, y| self.cell(x, y).height())
    }
}

/// A world that stores the river network built for it.
pub trait RiverWorld: World {
    fn rivers(&self) -> &RiverNetwork;

    fn rivers_mut(&mut self) -> &mut RiverNetwork;
}

pub trait HeightCell {
    fn height(&self) -> f32;
    fn set_height(&mut self, height: f32);
}

pub trait RainfallCell {
    fn rainfall(&self) -> f32;
    fn set_rainfall(&mut self, rainfall: f32);
}

pub trait TemperatureCell {
    fn temperature(&self) -> f32;
    fn set_temperature(&mut self, temperature: f32);
}

/// Cells that remember which river segment passes through them.
pub trait RiverCell {
    fn river_segment(&self) -> Option<SegmentId>;
    fn set_river_segment(&mut self, segment: SegmentId);
}

pub trait BiomeCell<B> {
    fn biome(&self) -> Option<&B>;
    fn set_biome(&mut self, biome: B);
}

/// Returns true if any in-range orthogonal neighbour of `address` is ocean.
pub fn is_ocean_adjacent<W>(world: &W, address: CellAddress) -> bool
where
    W: HeightWorld,
    W::Cell: HeightCell,
{
    address
        .orthogonal_neighbors()
        .into_iter()
        .filter(|n| world.in_range(n.x, n.y))
        .any(|n| world.is_ocean(n.x as usize, n.y as usize))
}
