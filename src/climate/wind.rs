//! Latitude curves for a world spanning pole to pole.
//!
//! Row 0 and the last row are the poles; the middle row is the equator. The
//! zonal flow alternates direction every sixth of the map height, a rough
//! stand-in for the trade winds, westerlies and polar easterlies.

use std::f32::consts::PI;

use glam::Vec2;

/// Rows per half-period of the zonal wind, never less than one.
fn wind_band(height: usize) -> f32 {
    (height / 6).max(1) as f32
}

/// Eastward wind strength at a row.
///
/// # Arguments
/// * `y` - Row index, 0 at the top edge
/// * `height` - Number of rows in the world
///
/// # Returns
/// A value in `[-1, 1]`; negative values blow west
pub fn easterly_flow(y: usize, height: usize) -> f32 {
    -(y as f32 * PI / wind_band(height)).sin()
}

/// Unit prevailing-wind direction at row `y`.
///
/// The zonal part comes from [`easterly_flow`]; a small meridional part
/// points south in the upper half of the map and north in the lower half.
///
/// # Arguments
/// * `y` - Row index, 0 at the top edge
/// * `height` - Number of rows in the world
///
/// # Returns
/// Normalized wind vector with `+y` pointing south
pub fn prevailing_wind(y: usize, height: usize) -> Vec2 {
    let horizontal = easterly_flow(y, height);
    let vertical = if y > height / 2 { -0.1 } else { 0.1 };
    Vec2::new(horizontal, vertical).normalize_or_zero()
}

/// Rainfall weight for row `y` in `[0.25, 1]`, favouring the mid-latitudes.
pub fn mid_latitude_bias(y: usize, height: usize) -> f32 {
    let band = height as f32 / 6.0;
    let bias = -(y as f32 / PI / band).cos() / 2.0 + 0.5;
    0.75 * bias + 0.25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_alternates_by_band() {
        let height = 120;
        assert!(easterly_flow(0, height).abs() < 1e-6);
        assert!(easterly_flow(10, height) < -0.9);
        assert!(easterly_flow(30, height) > 0.9);
        for y in 0..height {
            assert!(easterly_flow(y, height).abs() <= 1.0);
        }
    }

    #[test]
    fn test_tiny_worlds_stay_finite() {
        for height in 1..6 {
            for y in 0..height {
                assert!(easterly_flow(y, height).is_finite());
                assert!(prevailing_wind(y, height).is_finite());
            }
        }
    }

    #[test]
    fn test_prevailing_wind_is_unit() {
        for y in 0..90 {
            let wind = prevailing_wind(y, 90);
            assert!((wind.length() - 1.0).abs() < 1e-5);
        }
        assert!(prevailing_wind(0, 90).y > 0.0);
        assert!(prevailing_wind(80, 90).y < 0.0);
    }

    #[test]
    fn test_mid_latitude_bias_range() {
        assert!((mid_latitude_bias(0, 120) - 0.25).abs() < 1e-6);
        for y in 0..600 {
            let b = mid_latitude_bias(y, 600);
            assert!((0.25 - 1e-6..=1.0 + 1e-6).contains(&b));
        }
    }
}
