//! Rainfall carried inland by prevailing winds from "point oceans".

use glam::Vec2;
use log::{debug, warn};

use super::wind::prevailing_wind;
use crate::error::GenerationError;
use crate::grid::{normalize, Grid};
use crate::pipeline::Generator;
use crate::world::{CellAddress, HeightCell, HeightWorld, RainfallCell};

/// Collapses each ocean-majority block into a single point and rains on
/// land cells according to how directly the wind blows from those points.
///
/// Every point ocean contributes `(cos θ / 2 + 0.5) / max(size / 2, d)`, where
/// `θ` is the angle between the wind and the direction to the ocean and `d`
/// the distance to it. The summed field is normalized; ocean cells end at 0.
#[derive(Debug, Clone)]
pub struct PointOceanRainGenerator {
    pub point_ocean_size: usize,
}

impl Default for PointOceanRainGenerator {
    fn default() -> Self {
        Self {
            point_ocean_size: 50,
        }
    }
}

impl PointOceanRainGenerator {
    pub fn new(point_ocean_size: usize) -> Self {
        Self { point_ocean_size }
    }

    fn block_size(&self) -> usize {
        if self.point_ocean_size == 0 {
            warn!("point ocean size 0 is invalid, using 1");
            1
        } else {
            self.point_ocean_size
        }
    }

    /// Centres of the full blocks where ocean cells outnumber land cells.
    pub fn find_point_oceans<W>(&self, world: &W) -> Vec<CellAddress>
    where
        W: HeightWorld,
        W::Cell: HeightCell,
    {
        let size = self.block_size();
        let mut oceans = Vec::new();

        for i in 0..world.width() / size {
            for j in 0..world.height() / size {
                let mut ocean = 0usize;
                let mut land = 0usize;
                for y in j * size..(j + 1) * size {
                    for x in i * size..(i + 1) * size {
                        if world.is_ocean(x, y) {
                            ocean += 1;
                        } else {
                            land += 1;
                        }
                    }
                }

                if ocean > land {
                    let cx = ((i as f64 + 0.5) * size as f64) as i32;
                    let cy = ((j as f64 + 0.5) * size as f64) as i32;
                    oceans.push(CellAddress::new(cx, cy));
                }
            }
        }

        oceans
    }

    /// Unnormalized rainfall at a land cell.
    ///
    /// # Arguments
    /// * `address` - Land cell to evaluate
    /// * `height` - Number of rows in the world, for the wind direction
    /// * `oceans` - Point oceans from [`Self::find_point_oceans`]
    ///
    /// # Returns
    /// Sum of every point ocean's contribution
    pub fn rainfall_at(&self, address: CellAddress, height: usize, oceans: &[CellAddress]) -> f32 {
        let wind = prevailing_wind(address.y as usize, height);
        let min_distance = (self.block_size() / 2) as f32;

        oceans
            .iter()
            .map(|&ocean| {
                let delta = (ocean.as_ivec2() - address.as_ivec2()).as_vec2();
                let direction = Vec2::from_angle(delta.y.atan2(delta.x));
                let alignment = direction.dot(wind) / 2.0 + 0.5;
                alignment / min_distance.max(delta.length())
            })
            .sum()
    }
}

impl<W> Generator<W> for PointOceanRainGenerator
where
    W: HeightWorld,
    W::Cell: HeightCell + RainfallCell,
{
    fn name(&self) -> &str {
        "Point Based Rainfall Simulator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        let oceans = self.find_point_oceans(world);
        debug!("{} point oceans", oceans.len());

        let (width, height) = (world.width(), world.height());
        let raw = Grid::from_fn(width, height, |x, y| {
            if world.is_ocean(x, y) {
                0.0
            } else {
                self.rainfall_at(CellAddress::new(x as i32, y as i32), height, &oceans)
            }
        });
        let rain = normalize(&raw)?;

        for y in 0..height {
            for x in 0..width {
                world.cell_mut(x, y).set_rainfall(rain.get(x, y));
            }
        }
        Ok(())
    }
}
