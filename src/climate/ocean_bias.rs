//! Coarse "nearness to ocean" field.

use std::collections::HashMap;

use log::warn;

use crate::grid::bilinear_interpolate;
use crate::world::{CellAddress, HeightCell, HeightWorld};

/// Fraction of ocean cells in the block whose origin is `location`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasPoint {
    pub location: CellAddress,
    pub ocean_percent: f32,
}

/// Samples the ocean fraction of every full block of a heightmap and
/// interpolates a smooth bias between block origins.
///
/// Blocks that were not sampled (the partial blocks along the right and
/// bottom edges) read as fully oceanic.
#[derive(Debug, Clone)]
pub struct OceanBiaser {
    block_size: usize,
    points: HashMap<CellAddress, BiasPoint>,
}

impl OceanBiaser {
    /// Samples `world` in `block_size` x `block_size` blocks.
    ///
    /// A block size of zero is treated as one.
    ///
    /// # Arguments
    /// * `world` - World whose heights decide ocean and land
    /// * `block_size` - Side of each sampled block, in cells
    pub fn new<W>(world: &W, block_size: usize) -> Self
    where
        W: HeightWorld,
        W::Cell: HeightCell,
    {
        let block_size = if block_size == 0 {
            warn!("ocean bias block size 0 is invalid, using 1");
            1
        } else {
            block_size
        };

        let mut points = HashMap::new();
        for i in 0..world.width() / block_size {
            for j in 0..world.height() / block_size {
                let (ox, oy) = (i * block_size, j * block_size);
                let mut ocean = 0usize;
                for y in oy..oy + block_size {
                    for x in ox..ox + block_size {
                        if world.is_ocean(x, y) {
                            ocean += 1;
                        }
                    }
                }

                let location = CellAddress::new(ox as i32, oy as i32);
                let ocean_percent = ocean as f32 / (block_size * block_size) as f32;
                points.insert(location, BiasPoint { location, ocean_percent });
            }
        }

        Self { block_size, points }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Sampled ocean fraction at a block origin, if that block was sampled.
    pub fn point(&self, origin: CellAddress) -> Option<&BiasPoint> {
        self.points.get(&origin)
    }

    fn percent_at(&self, x: i32, y: i32) -> f32 {
        self.points
            .get(&CellAddress::new(x, y))
            .map_or(1.0, |p| p.ocean_percent)
    }

    /// Interpolates within the block whose origin is `origin`, with
    /// `(tx, ty)` in `[0, 1]` measured from that origin.
    pub fn interpolate_block(&self, origin: CellAddress, tx: f32, ty: f32) -> f32 {
        let bs = self.block_size as i32;
        let ul = self.percent_at(origin.x, origin.y);
        let ur = self.percent_at(origin.x + bs, origin.y);
        let ll = self.percent_at(origin.x, origin.y + bs);
        let lr = self.percent_at(origin.x + bs, origin.y + bs);
        bilinear_interpolate(ul, ur, ll, lr, tx, ty)
    }

    /// Ocean bias at a cell.
    ///
    /// # Arguments
    /// * `address` - Cell to evaluate
    ///
    /// # Returns
    /// Interpolated ocean fraction in `[0, 1]`; blocks that were never
    /// sampled read as fully oceanic
    pub fn bias_at(&self, address: CellAddress) -> f32 {
        let bs = self.block_size as i32;
        let origin = CellAddress::new(
            address.x.div_euclid(bs) * bs,
            address.y.div_euclid(bs) * bs,
        );
        let tx = (address.x - origin.x) as f32 / bs as f32;
        let ty = (address.y - origin.y) as f32 / bs as f32;
        self.interpolate_block(origin, tx, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridWorld;

    /// 100x100 world, ocean on the left half.
    fn half_ocean() -> GridWorld {
        let mut world = GridWorld::new(100, 100, 0, 100.0, 50.0);
        world.fill_heights(|x, _| if x < 50 { 10.0 } else { 80.0 });
        world
    }

    #[test]
    fn test_points_record_ocean_fraction() {
        let world = half_ocean();
        let biaser = OceanBiaser::new(&world, 25);
        assert_eq!(biaser.point_count(), 16);
        assert_eq!(biaser.point(CellAddress::new(0, 0)).unwrap().ocean_percent, 1.0);
        assert_eq!(biaser.point(CellAddress::new(50, 25)).unwrap().ocean_percent, 0.0);
        assert!(biaser.point(CellAddress::new(10, 0)).is_none());
    }

    #[test]
    fn test_bias_at_block_origin_is_sample() {
        let world = half_ocean();
        let biaser = OceanBiaser::new(&world, 25);
        assert_eq!(biaser.bias_at(CellAddress::new(0, 0)), 1.0);
        assert_eq!(biaser.bias_at(CellAddress::new(50, 50)), 0.0);
        // Between an ocean origin and a land origin.
        let mid = biaser.bias_at(CellAddress::new(37, 0));
        assert!((mid - 0.52).abs() < 1e-5, "got {mid}");
    }

    #[test]
    fn test_unsampled_blocks_read_as_ocean() {
        let mut world: GridWorld = GridWorld::new(30, 30, 0, 100.0, 50.0);
        world.fill_heights(|_, _| 90.0);
        let biaser = OceanBiaser::new(&world, 25);
        assert_eq!(biaser.point_count(), 1);
        assert_eq!(biaser.bias_at(CellAddress::new(0, 0)), 0.0);
        // The trailing partial block has no sample of its own.
        assert_eq!(biaser.bias_at(CellAddress::new(27, 27)), 1.0);
    }

    #[test]
    fn test_continuous_across_block_edges() {
        let mut world: GridWorld = GridWorld::new(100, 100, 0, 100.0, 50.0);
        world.fill_heights(|x, y| if (x * 7 + y * 13) % 5 < 2 { 10.0 } else { 80.0 });
        let biaser = OceanBiaser::new(&world, 20);

        for bx in 0..4 {
            for by in 0..5 {
                let a = CellAddress::new(bx * 20, by * 20);
                let b = CellAddress::new((bx + 1) * 20, by * 20);
                for step in 0..=10 {
                    let t = step as f32 / 10.0;
                    let from_a = biaser.interpolate_block(a, 1.0, t);
                    let from_b = biaser.interpolate_block(b, 0.0, t);
                    assert!((from_a - from_b).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_bias_stays_in_unit_range() {
        let world = half_ocean();
        let biaser = OceanBiaser::new(&world, 25);
        for y in 0..100 {
            for x in 0..100 {
                let b = biaser.bias_at(CellAddress::new(x, y));
                assert!((-1e-6..=1.0 + 1e-6).contains(&b), "bias {b} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_zero_block_size_is_clamped() {
        let world = half_ocean();
        let biaser = OceanBiaser::new(&world, 0);
        assert_eq!(biaser.block_size(), 1);
        assert_eq!(biaser.bias_at(CellAddress::new(3, 3)), 1.0);
    }
}
