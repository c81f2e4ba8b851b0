//! Category labels used by biome selection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fraction of max elevation at and above which land counts as high.
pub const MOUNTAIN_LEVEL_PERCENT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeCategory {
    Ocean,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureCategory {
    Cold,
    Cool,
    Warm,
    Hot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoistureCategory {
    Arid,
    Dry,
    Moist,
    Wet,
}

/// Classifies an absolute height.
///
/// Anything strictly below sea level is ocean. Land between sea level and
/// [`MOUNTAIN_LEVEL_PERCENT`] is split at the midpoint into low and medium;
/// everything at or above the mountain level is high.
pub fn map_altitude_to_category(height: f32, max_elevation: f32, sea_level: f32) -> AltitudeCategory {
    let altitude_percent = height / max_elevation;
    let sea_level_percent = sea_level / max_elevation;

    if altitude_percent < sea_level_percent {
        return AltitudeCategory::Ocean;
    }

    let midpoint = (MOUNTAIN_LEVEL_PERCENT - sea_level_percent) / 2.0 + sea_level_percent;

    if altitude_percent < midpoint {
        AltitudeCategory::Low
    } else if altitude_percent < MOUNTAIN_LEVEL_PERCENT {
        AltitudeCategory::Medium
    } else {
        AltitudeCategory::High
    }
}

/// Quartiles of a normalized temperature; each boundary belongs to the upper band.
pub fn map_temperature_to_category(temperature: f32) -> TemperatureCategory {
    if temperature < 0.25 {
        TemperatureCategory::Cold
    } else if temperature < 0.5 {
        TemperatureCategory::Cool
    } else if temperature < 0.75 {
        TemperatureCategory::Warm
    } else {
        TemperatureCategory::Hot
    }
}

/// Quartiles of a normalized rainfall; each boundary belongs to the upper band.
pub fn map_moisture_to_category(moisture: f32) -> MoistureCategory {
    if moisture < 0.25 {
        MoistureCategory::Arid
    } else if moisture < 0.5 {
        MoistureCategory::Dry
    } else if moisture < 0.75 {
        MoistureCategory::Moist
    } else {
        MoistureCategory::Wet
    }
}

/// Most frequent temperature category among `temperatures`.
///
/// Ties go to the category that reached the winning count first.
pub fn dominant_temperature(
    temperatures: impl IntoIterator<Item = f32>,
) -> Option<TemperatureCategory> {
    let mut counts: HashMap<TemperatureCategory, usize> = HashMap::new();
    let mut best: Option<(TemperatureCategory, usize)> = None;

    for t in temperatures {
        let category = map_temperature_to_category(t);
        let count = counts.entry(category).or_insert(0);
        *count += 1;
        match best {
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((category, *count)),
        }
    }

    best.map(|(category, _)| category)
}
