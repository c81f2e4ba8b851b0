//! Cloud advection rainfall model.

use log::debug;

use super::config::ClimateConfig;
use super::ocean_bias::OceanBiaser;
use super::rainfall::RAIN_WEIGHT;
use super::wind::easterly_flow;
use crate::error::GenerationError;
use crate::grid::{normalize, wrap_index, Grid};
use crate::pipeline::Generator;
use crate::world::{CellAddress, HeightCell, HeightWorld, RainfallCell};

/// Simulates clouds picked up over the ocean and blown across land.
///
/// Each of `width` iterations first lets every ocean cell add cloud and every
/// land cell rain out a share of its cloud proportional to its elevation,
/// then moves clouds one cell east or west (wrapping around) by the latitude
/// wind, keeping the rest in place. The accumulated rainfall is normalized
/// and blended with the ocean bias.
#[derive(Debug, Clone)]
pub struct AirflowRainSimulator {
    pub cloud_pickup_rate: f32,
    pub cloud_drop_rate: f32,
    pub ocean_bias_block_size: usize,
}

impl Default for AirflowRainSimulator {
    fn default() -> Self {
        Self::from_config(&ClimateConfig::default())
    }
}

impl AirflowRainSimulator {
    pub fn from_config(config: &ClimateConfig) -> Self {
        Self {
            cloud_pickup_rate: config.cloud_pickup_rate,
            cloud_drop_rate: config.cloud_drop_rate,
            ocean_bias_block_size: config.ocean_bias_block_size,
        }
    }

    /// One pickup/rainout step, in place.
    ///
    /// # Arguments
    /// * `world` - Source of ocean/land and elevation
    /// * `clouds` - Cloud per cell, updated in place
    /// * `rainfall` - Accumulated rain per cell, updated in place
    pub fn pick_up_and_drop<W>(&self, world: &W, clouds: &mut Grid, rainfall: &mut Grid)
    where
        W: HeightWorld,
        W::Cell: HeightCell,
    {
        let max_elevation = world.max_elevation();
        for y in 0..world.height() {
            for x in 0..world.width() {
                if world.is_ocean(x, y) {
                    *clouds.get_mut(x, y) += self.cloud_pickup_rate;
                } else {
                    let elevation = world.cell(x, y).height() / max_elevation;
                    let rain = (clouds.get(x, y) * self.cloud_drop_rate * elevation).max(0.0);
                    *rainfall.get_mut(x, y) += rain;
                    *clouds.get_mut(x, y) -= rain;
                }
            }
        }
    }

    /// Advects every cloud into a fresh buffer, so all moves read the same
    /// previous state.
    pub fn move_clouds(clouds: &Grid) -> Grid {
        let (width, height) = (clouds.width(), clouds.height());
        let mut moved = Grid::new(width, height);

        for y in 0..height {
            let easterly = easterly_flow(y, height);
            let east = easterly.max(0.0);
            let west = (-easterly).max(0.0);
            let persist = (1.0 - (east + west)).max(0.0);

            for x in 0..width {
                let cloud = clouds.get(x, y);
                let west_x = wrap_index(x as i64 - 1, width);
                let east_x = wrap_index(x as i64 + 1, width);

                *moved.get_mut(west_x, y) += cloud * west;
                *moved.get_mut(east_x, y) += cloud * east;
                *moved.get_mut(x, y) += cloud * persist;
            }
        }

        moved
    }

    /// Runs the full simulation and returns the raw accumulated rainfall.
    pub fn accumulate<W>(&self, world: &W) -> Grid
    where
        W: HeightWorld,
        W::Cell: HeightCell,
    {
        let (width, height) = (world.width(), world.height());
        let mut rainfall = Grid::new(width, height);
        let mut clouds = Grid::new(width, height);

        for _ in 0..width {
            self.pick_up_and_drop(world, &mut clouds, &mut rainfall);
            clouds = Self::move_clouds(&clouds);
        }

        rainfall
    }
}

impl<W> Generator<W> for AirflowRainSimulator
where
    W: HeightWorld,
    W::Cell: HeightCell + RainfallCell,
{
    fn name(&self) -> &str {
        "Airflow Rain Simulator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        let biaser = OceanBiaser::new(world, self.ocean_bias_block_size);
        let raw = self.accumulate(world);
        if let Some((_, peak)) = raw.min_max() {
            debug!("airflow peak accumulated rainfall {:.3}", peak);
        }
        let rain = normalize(&raw)?;

        for y in 0..world.height() {
            for x in 0..world.width() {
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
    use crate::error::GridError;
    use crate::world::{GridWorld, World};

    #[test]
    fn test_move_conserves_cloud_mass() {
        let clouds = Grid::from_fn(16, 12, |x, y| (x * 3 + y) as f32);
        let moved = AirflowRainSimulator::move_clouds(&clouds);
        let before: f32 = clouds.values().iter().sum();
        let after: f32 = moved.values().iter().sum();
        assert!((before - after).abs() < 1e-3 * before);
    }

    #[test]
    fn test_move_wraps_around() {
        let mut clouds = Grid::new(5, 36);
        clouds.set(0, 3, 1.0);
        let moved = AirflowRainSimulator::move_clouds(&clouds);
        // -sin(3π/6) = -1: all of it moves west, wrapping to the last column.
        assert!((moved.get(4, 3) - 1.0).abs() < 1e-6);
        assert!(moved.get(0, 3).abs() < 1e-6);
        assert!(moved.get(1, 3).abs() < 1e-6);
    }

    #[test]
    fn test_move_reads_previous_state_only() {
        let mut clouds = Grid::new(4, 36);
        clouds.set(1, 3, 1.0);
        clouds.set(2, 3, 2.0);
        let moved = AirflowRainSimulator::move_clouds(&clouds);
        assert!((moved.get(0, 3) - 1.0).abs() < 1e-6);
        assert!((moved.get(1, 3) - 2.0).abs() < 1e-6);
        assert!(moved.get(2, 3).abs() < 1e-6);
    }

    #[test]
    fn test_rain_falls_downwind_of_ocean() {
        // Ocean columns 0..8, mountains rising to the east; the top rows blow west,
        // so clouds wrap around the map edge and rain onto the high ground.
        let mut world: GridWorld = GridWorld::new(32, 36, 1, 100.0, 50.0);
        world.fill_heights(|x, _| if x < 8 { 10.0 } else { 50.0 + 1.5 * x as f32 });

        let sim = AirflowRainSimulator::default();
        let raw = sim.accumulate(&world);
        for y in 0..36 {
            for x in 0..8 {
                assert_eq!(raw.get(x, y), 0.0, "ocean cells never accumulate rain");
            }
        }
        assert!(raw.get(31, 3) > 0.0);

        sim.run_generation(&mut world).unwrap();
        for (x, y) in world.coords() {
            let r = world.cell(x, y).rainfall;
            assert!((0.0..=1.0 + 1e-6).contains(&r));
        }
    }

    #[test]
    fn test_all_ocean_world_is_degenerate() {
        let mut world: GridWorld = GridWorld::new(12, 12, 1, 100.0, 50.0);
        world.fill_heights(|_, _| 5.0);
        let err = AirflowRainSimulator::default()
            .run_generation(&mut world)
            .unwrap_err();
        assert!(matches!(err, GenerationError::Grid(GridError::Degenerate { .. })));
    }
}
