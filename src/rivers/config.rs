//! River placement configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters for spring placement and river acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverConfig {
    /// Multiplied by a cell's rainfall to get its chance of hosting a spring.
    pub spring_chance_modifier: f64,
    /// Rivers with fewer segments than this are discarded.
    pub min_length: usize,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            spring_chance_modifier: 0.004,
            min_length: 3,
        }
    }
}

impl RiverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.spring_chance_modifier) {
            return Err(ConfigError::InvalidParameter {
                name: "spring_chance_modifier",
                reason: format!("{} is outside [0, 1]", self.spring_chance_modifier),
            });
        }
        if self.min_length == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "min_length",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
