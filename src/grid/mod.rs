//! Dense 2D scalar fields and the pure helpers the passes share.

mod category;

pub use category::{
    dominant_temperature, map_altitude_to_category, map_moisture_to_category,
    map_temperature_to_category, AltitudeCategory, MoistureCategory, TemperatureCategory,
    MOUNTAIN_LEVEL_PERCENT,
};

use crate::error::GridError;

/// A dense `width` x `height` field of `f32`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl Grid {
    /// Creates a zero-filled grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Panics
    /// If `values.len() != width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Self {
        assert_eq!(values.len(), width * height, "grid buffer size mismatch");
        Self {
            width,
            height,
            values,
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.index(x, y);
        self.values[i] = value;
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut f32 {
        let i = self.index(x, y);
        &mut self.values[i]
    }

    /// Row-major view of the values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Observed `(min, max)`, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.values.is_empty() {
            return None;
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// See [`normalize`].
    pub fn normalized(&self) -> Result<Grid, GridError> {
        normalize(self)
    }
}

/// Rescales every value linearly so the observed minimum maps to 0 and the
/// observed maximum to 1.
///
/// Fails with [`GridError::Degenerate`] when the field has no range.
pub fn normalize(grid: &Grid) -> Result<Grid, GridError> {
    let (min, max) = grid.min_max().ok_or(GridError::Degenerate { value: 0.0 })?;
    if min >= max {
        return Err(GridError::Degenerate { value: min });
    }

    let range = max - min;
    let values = grid.values.iter().map(|&v| (v - min) / range).collect();
    Ok(Grid::from_values(grid.width, grid.height, values))
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn interpolate(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Four-corner interpolation; `(tx, ty) = (0, 0)` yields `ul`, `(1, 1)` yields `lr`.
#[inline]
pub fn bilinear_interpolate(ul: f32, ur: f32, ll: f32, lr: f32, tx: f32, ty: f32) -> f32 {
    let upper = interpolate(ul, ur, tx);
    let lower = interpolate(ll, lr, tx);
    interpolate(upper, lower, ty)
}

/// Bounds-safe lookup with signed coordinates.
pub fn value_or_default(grid: &Grid, x: i32, y: i32, default: f32) -> f32 {
    if x < 0 || y < 0 || x as usize >= grid.width || y as usize >= grid.height {
        return default;
    }
    grid.get(x as usize, y as usize)
}

/// Wraps any index into `[0, size)`.
///
/// # Panics
/// If `size` is zero.
#[inline]
pub fn wrap_index(index: i64, size: usize) -> usize {
    assert!(size > 0, "cannot wrap into an empty range");
    index.rem_euclid(size as i64) as usize
}
