//! Landmass bias strategies for the heightmap.
//!
//! A bias grid is a small field of weights in `[0, 1]` that is stretched over
//! the whole world and multiplied into the elevation noise, deciding where
//! land can rise at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GridError};
use crate::grid::{bilinear_interpolate, normalize, value_or_default, Grid};
use crate::noise::{sample_noise_field, FractalNoiseConfig, NoiseEngine};

/// Side length of the random grid behind [`HeightmapBias::Continents`].
pub const CONTINENTS_GRID_SIZE: usize = 10;
/// Side length of the random grid behind [`HeightmapBias::Islands`].
pub const ISLANDS_GRID_SIZE: usize = 20;
/// Normalized noise above this becomes land in a random bias grid.
pub const RANDOM_BIAS_THRESHOLD: f32 = 0.6;

const AZEROTH_SIZE: usize = 8;
const AZEROTH_LAND: [(usize, usize); 15] = [
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 4),
    (2, 5),
    (2, 6),
    (3, 1),
    (4, 1),
    (4, 2),
    (6, 3),
    (6, 4),
    (6, 5),
    (5, 4),
    (5, 5),
    (5, 6),
];

const LANDMASS_SIZE: usize = 4;
const LANDMASS_LAND: [(usize, usize); 4] = [(1, 1), (1, 2), (2, 1), (2, 2)];

/// Where landmasses are allowed to form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightmapBias {
    /// No bias; the noise alone shapes the land.
    None,
    /// A few large random landmasses kept away from the map edges.
    #[default]
    Continents,
    /// Many small random landmasses kept away from the map edges.
    Islands,
    /// A fixed layout of three landmasses.
    Azeroth,
    /// A single landmass in the middle of the map.
    Landmass,
}

impl HeightmapBias {
    pub const ALL: [HeightmapBias; 5] = [
        HeightmapBias::None,
        HeightmapBias::Continents,
        HeightmapBias::Islands,
        HeightmapBias::Azeroth,
        HeightmapBias::Landmass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeightmapBias::None => "none",
            HeightmapBias::Continents => "continents",
            HeightmapBias::Islands => "islands",
            HeightmapBias::Azeroth => "azeroth",
            HeightmapBias::Landmass => "landmass",
        }
    }

    /// Builds the coarse bias grid for this strategy.
    ///
    /// Random strategies draw from `engine`; authored layouts ignore it.
    pub fn bias_grid(self, engine: &NoiseEngine) -> Result<Grid, GridError> {
        match self {
            HeightmapBias::None => Ok(Grid::filled(2, 2, 1.0)),
            HeightmapBias::Continents => random_bias_grid(engine, CONTINENTS_GRID_SIZE),
            HeightmapBias::Islands => random_bias_grid(engine, ISLANDS_GRID_SIZE),
            HeightmapBias::Azeroth => Ok(authored_grid(AZEROTH_SIZE, &AZEROTH_LAND)),
            HeightmapBias::Landmass => Ok(authored_grid(LANDMASS_SIZE, &LANDMASS_LAND)),
        }
    }

    /// Builds the bias grid and stretches it to `width` x `height`.
    pub fn expanded(self, engine: &NoiseEngine, width: usize, height: usize) -> Result<Grid, GridError> {
        if self == HeightmapBias::None {
            return Ok(Grid::filled(width, height, 1.0));
        }
        let grid = self.bias_grid(engine)?;
        Ok(expand_bias_grid(&grid, width, height))
    }
}

impl fmt::Display for HeightmapBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeightmapBias {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HeightmapBias::ALL
            .into_iter()
            .find(|bias| bias.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownHeightmapBias(s.to_string()))
    }
}

/// Noise-derived `size` x `size` grid of hard 0/1 weights with a zero border.
pub fn random_bias_grid(engine: &NoiseEngine, size: usize) -> Result<Grid, GridError> {
    let noise = sample_noise_field(engine, size, size, &FractalNoiseConfig::bias_grid());
    let mut grid = normalize(&noise)?;

    for y in 0..size {
        for x in 0..size {
            let edge = x == 0 || y == 0 || x == size - 1 || y == size - 1;
            let value = if !edge && grid.get(x, y) > RANDOM_BIAS_THRESHOLD {
                1.0
            } else {
                0.0
            };
            grid.set(x, y, value);
        }
    }

    Ok(grid)
}

fn authored_grid(size: usize, land: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(size, size);
    for &(x, y) in land {
        grid.set(x, y, 1.0);
    }
    grid
}

/// Stretches a coarse grid over `width` x `height` cells by bilinear
/// interpolation; corners past the grid read as zero.
pub fn expand_bias_grid(grid: &Grid, width: usize, height: usize) -> Grid {
    let step_x = (grid.width() as f32 - 1.0) / width as f32;
    let step_y = (grid.height() as f32 - 1.0) / height as f32;

    Grid::from_fn(width, height, |x, y| {
        let fx = x as f32 * step_x;
        let fy = y as f32 * step_y;
        let bx = fx.floor();
        let by = fy.floor();
        let (ix, iy) = (bx as i32, by as i32);

        let ul = value_or_default(grid, ix, iy, 0.0);
        let ur = value_or_default(grid, ix + 1, iy, 0.0);
        let ll = value_or_default(grid, ix, iy + 1, 0.0);
        let lr = value_or_default(grid, ix + 1, iy + 1, 0.0);

        bilinear_interpolate(ul, ur, ll, lr, fx - bx, fy - by)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Continents".parse::<HeightmapBias>(), Ok(HeightmapBias::Continents));
        assert_eq!(" ISLANDS ".parse::<HeightmapBias>(), Ok(HeightmapBias::Islands));
        for bias in HeightmapBias::ALL {
            assert_eq!(bias.to_string().parse::<HeightmapBias>(), Ok(bias));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "pangaea".parse::<HeightmapBias>(),
            Err(ConfigError::UnknownHeightmapBias("pangaea".to_string()))
        );
    }

    #[test]
    fn test_authored_layouts() {
        let engine = NoiseEngine::new(0);
        let azeroth = HeightmapBias::Azeroth.bias_grid(&engine).unwrap();
        assert_eq!(azeroth.width(), 8);
        assert_eq!(azeroth.values().iter().filter(|&&v| v == 1.0).count(), 15);
        assert_eq!(azeroth.get(3, 1), 1.0);
        assert_eq!(azeroth.get(1, 3), 1.0);
        assert_eq!(azeroth.get(0, 0), 0.0);

        let landmass = HeightmapBias::Landmass.bias_grid(&engine).unwrap();
        assert_eq!(landmass.values().iter().sum::<f32>(), 4.0);
        assert_eq!(landmass.get(0, 3), 0.0);
    }

    #[test]
    fn test_random_grid_is_binary_with_zero_border() {
        for seed in [1, 2, 3] {
            let engine = NoiseEngine::for_layer(seed, "height_bias");
            let grid = random_bias_grid(&engine, ISLANDS_GRID_SIZE).unwrap();
            assert!(grid.values().iter().all(|&v| v == 0.0 || v == 1.0));
            for i in 0..ISLANDS_GRID_SIZE {
                assert_eq!(grid.get(i, 0), 0.0);
                assert_eq!(grid.get(0, i), 0.0);
                assert_eq!(grid.get(i, ISLANDS_GRID_SIZE - 1), 0.0);
                assert_eq!(grid.get(ISLANDS_GRID_SIZE - 1, i), 0.0);
            }
        }
    }

    #[test]
    fn test_expansion_stays_in_unit_range() {
        let engine = NoiseEngine::new(4);
        let grid = HeightmapBias::Azeroth.expanded(&engine, 64, 48).unwrap();
        assert_eq!((grid.width(), grid.height()), (64, 48));
        let (min, max) = grid.min_max().unwrap();
        assert!(min >= 0.0 && max <= 1.0);
        assert!(max > 0.5, "some land should survive expansion");
        // The authored layouts leave the top-left corner as sea.
        assert_eq!(grid.get(0, 0), 0.0);
    }

    #[test]
    fn test_no_bias_is_uniform() {
        let grid = HeightmapBias::None.expanded(&NoiseEngine::new(0), 10, 7).unwrap();
        assert!(grid.values().iter().all(|&v| v == 1.0));
    }
}
