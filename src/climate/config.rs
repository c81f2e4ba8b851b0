//! Climate configuration parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::noise::FractalNoiseConfig;

/// Configuration shared by the temperature and rainfall passes.
///
/// Units:
/// - block sizes: cells
/// - cloud rates: relative mass per iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Edge length of the blocks the ocean biaser samples.
    pub ocean_bias_block_size: usize,
    /// Edge length of the blocks collapsed into point oceans.
    pub point_ocean_size: usize,

    // Airflow model
    pub cloud_pickup_rate: f32,
    pub cloud_drop_rate: f32,

    pub temperature_noise: FractalNoiseConfig,
    pub rainfall_noise: FractalNoiseConfig,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            ocean_bias_block_size: 25,
            point_ocean_size: 50,
            cloud_pickup_rate: 2.0,
            cloud_drop_rate: 0.005,
            temperature_noise: FractalNoiseConfig::temperature(),
            rainfall_noise: FractalNoiseConfig::rainfall(),
        }
    }
}

impl ClimateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ocean_bias_block_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "ocean_bias_block_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.point_ocean_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "point_ocean_size",
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, rate) in [
            ("cloud_pickup_rate", self.cloud_pickup_rate),
            ("cloud_drop_rate", self.cloud_drop_rate),
        ] {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("{} is not a non-negative number", rate),
                });
            }
        }
        self.temperature_noise.validate()?;
        self.rainfall_noise.validate()
    }
}

/// Which rainfall strategy a pipeline runs. Exactly one is used per world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RainfallModel {
    /// Latitude-biased noise blended with ocean proximity over land.
    #[default]
    Noise,
    /// Plain normalized noise everywhere.
    Simplex,
    /// Prevailing winds blowing in from point oceans.
    PointOcean,
    /// Iterative cloud pickup, advection and rainout.
    Airflow,
}

impl RainfallModel {
    pub const ALL: [RainfallModel; 4] = [
        RainfallModel::Noise,
        RainfallModel::Simplex,
        RainfallModel::PointOcean,
        RainfallModel::Airflow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RainfallModel::Noise => "noise",
            RainfallModel::Simplex => "simplex",
            RainfallModel::PointOcean => "point-ocean",
            RainfallModel::Airflow => "airflow",
        }
    }
}

impl fmt::Display for RainfallModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RainfallModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RainfallModel::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownRainfallModel(s.to_string()))
    }
}
