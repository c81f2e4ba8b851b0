//! In-memory world storage.

use super::{
    BiomeCell, HeightCell, HeightWorld, RainfallCell, RiverCell, RiverWorld, TemperatureCell, World,
};
use crate::biomes::SimpleBiome;
use crate::grid::Grid;
use crate::rivers::{RiverNetwork, SegmentId};

/// One cell of a [`GridWorld`], carrying every physical attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<B = SimpleBiome> {
    /// Absolute elevation in `[0, max_elevation]`.
    pub height: f32,
    /// Normalized rainfall.
    pub rainfall: f32,
    /// Normalized temperature.
    pub temperature: f32,
    /// River segment passing through this cell (populated by the river pass).
    pub river_segment: Option<SegmentId>,
    /// Biome (populated by the biome pass).
    pub biome: Option<B>,
}

impl<B> Default for Cell<B> {
    fn default() -> Self {
        Self {
            height: 0.0,
            rainfall: 0.0,
            temperature: 0.0,
            river_segment: None,
            biome: None,
        }
    }
}

impl<B> HeightCell for Cell<B> {
    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }
}

impl<B> RainfallCell for Cell<B> {
    fn rainfall(&self) -> f32 {
        self.rainfall
    }

    fn set_rainfall(&mut self, rainfall: f32) {
        self.rainfall = rainfall;
    }
}

impl<B> TemperatureCell for Cell<B> {
    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature;
    }
}

impl<B> RiverCell for Cell<B> {
    fn river_segment(&self) -> Option<SegmentId> {
        self.river_segment
    }

    fn set_river_segment(&mut self, segment: SegmentId) {
        self.river_segment = Some(segment);
    }
}

impl<B> BiomeCell<B> for Cell<B> {
    fn biome(&self) -> Option<&B> {
        self.biome.as_ref()
    }

    fn set_biome(&mut self, biome: B) {
        self.biome = Some(biome);
    }
}

/// A rectangular world stored as a row-major vector of cells.
#[derive(Debug, Clone)]
pub struct GridWorld<B = SimpleBiome> {
    /// Master seed for generation.
    pub seed: u64,
    /// Elevation that normalized height 1.0 maps to.
    pub max_elevation: f32,
    /// Heights strictly below this are ocean.
    pub sea_level: f32,
    width: usize,
    height: usize,
    cells: Vec<Cell<B>>,
    rivers: RiverNetwork,
}

impl<B> GridWorld<B> {
    /// Creates a world with every cell zeroed.
    pub fn new(width: usize, height: usize, seed: u64, max_elevation: f32, sea_level: f32) -> Self {
        let cells = (0..width * height).map(|_| Cell::default()).collect();
        Self {
            seed,
            max_elevation,
            sea_level,
            width,
            height,
            cells,
            rivers: RiverNetwork::new(),
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Overwrites every cell's height from `f(x, y)`.
    pub fn fill_heights(&mut self, mut f: impl FnMut(usize, usize) -> f32) {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.index(x, y);
                self.cells[i].height = f(x, y);
            }
        }
    }

    /// Returns (min, max) height across the world.
    pub fn height_range(&self) -> (f32, f32) {
        self.cells.iter().fold((f32::MAX, f32::MIN), |(min, max), c| {
            (min.min(c.height), max.max(c.height))
        })
    }

    pub fn rainfall_field(&self) -> Grid {
        Grid::from_fn(self.width, self.height, |x, y| self.cells[self.index(x, y)].rainfall)
    }

    pub fn temperature_field(&self) -> Grid {
        Grid::from_fn(self.width, self.height, |x, y| {
            self.cells[self.index(x, y)].temperature
        })
    }

    /// Iterates over all `(x, y)` coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

impl<B> World for GridWorld<B> {
    type Cell = Cell<B>;

    fn seed(&self) -> u64 {
        self.seed
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, x: usize, y: usize) -> &Cell<B> {
        &self.cells[self.index(x, y)]
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell<B> {
        let i = self.index(x, y);
        &mut self.cells[i]
    }
}

impl<B> HeightWorld for GridWorld<B> {
    fn max_elevation(&self) -> f32 {
        self.max_elevation
    }

    fn sea_level(&self) -> f32 {
        self.sea_level
    }
}

impl<B> RiverWorld for GridWorld<B> {
    fn rivers(&self) -> &RiverNetwork {
        &self.rivers
    }

    fn rivers_mut(&mut self) -> &mut RiverNetwork {
        &mut self.rivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{is_ocean_adjacent, CellAddress};

    #[test]
    fn test_world_creation() {
        let world: GridWorld = GridWorld::new(16, 8, 42, 100.0, 50.0);
        assert_eq!(world.width(), 16);
        assert_eq!(world.height(), 8);
        assert_eq!(world.seed(), 42);
        assert!(world.rivers().is_empty());
        assert!(world.coords().all(|(x, y)| world.cell(x, y).height == 0.0));
    }

    #[test]
    fn test_in_range() {
        let world: GridWorld = GridWorld::new(4, 3, 0, 100.0, 50.0);
        assert!(world.in_range(0, 0));
        assert!(world.in_range(3, 2));
        assert!(!world.in_range(4, 0));
        assert!(!world.in_range(0, 3));
        assert!(!world.in_range(-1, 1));
    }

    #[test]
    fn test_ocean_is_strictly_below_sea_level() {
        let mut world: GridWorld = GridWorld::new(2, 1, 0, 100.0, 50.0);
        world.cell_mut(0, 0).set_height(49.5);
        world.cell_mut(1, 0).set_height(50.0);
        assert!(world.is_ocean(0, 0));
        assert!(!world.is_ocean(1, 0));
    }

    #[test]
    fn test_ocean_adjacency() {
        let mut world: GridWorld = GridWorld::new(3, 3, 0, 100.0, 50.0);
        world.fill_heights(|_, _| 80.0);
        world.cell_mut(0, 0).set_height(10.0);
        assert!(is_ocean_adjacent(&world, CellAddress::new(1, 0)));
        assert!(!is_ocean_adjacent(&world, CellAddress::new(1, 1)));
        assert!(!is_ocean_adjacent(&world, CellAddress::new(2, 2)));
    }

    #[test]
    fn test_height_range_and_fields() {
        let mut world: GridWorld = GridWorld::new(4, 4, 0, 100.0, 50.0);
        world.fill_heights(|x, y| (x + y) as f32);
        assert_eq!(world.height_range(), (0.0, 6.0));
        assert_eq!(world.height_field().get(3, 2), 5.0);
        world.cell_mut(1, 2).set_rainfall(0.4);
        assert_eq!(world.rainfall_field().get(1, 2), 0.4);
    }
}
