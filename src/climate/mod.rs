//! Temperature and rainfall passes.
//!
//! Every pass here assumes the world spans pole to pole: row 0 and the last
//! row are the poles and the middle row is the equator. The four rainfall
//! passes are alternatives; a pipeline runs exactly one of them.

mod airflow;
mod config;
mod ocean_bias;
mod point_ocean;
mod rainfall;
mod temperature;
mod wind;

pub use airflow::AirflowRainSimulator;
pub use config::{ClimateConfig, RainfallModel};
pub use ocean_bias::{BiasPoint, OceanBiaser};
pub use point_ocean::PointOceanRainGenerator;
pub use rainfall::{BiasedNoiseRainGenerator, SimplexRainGenerator};
pub use temperature::TemperatureGenerator;
pub use wind::{easterly_flow, mid_latitude_bias, prevailing_wind};
