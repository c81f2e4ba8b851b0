//! Deterministic physical-layer generation for grid worlds.
//!
//! A world is generated by a [`WorldGenerator`] running independent passes in
//! order: elevation, temperature, one rainfall model, rivers and biomes. Every
//! pass derives its randomness from the world seed and a fixed label, so the
//! same seed and configuration always produce the same world.
//!
//! ```
//! use worldforge::{standard_pipeline, GridWorld, SimpleBiome, WorldGenConfig};
//! use worldforge::grid::{AltitudeCategory, MoistureCategory, TemperatureCategory};
//!
//! let template = |a: AltitudeCategory, _: TemperatureCategory, _: MoistureCategory| {
//!     SimpleBiome::new(if a == AltitudeCategory::Ocean { "sea" } else { "land" })
//! };
//! let pipeline = standard_pipeline(&WorldGenConfig::default(), template).unwrap();
//!
//! let mut world: GridWorld = GridWorld::new(96, 64, 42, 100.0, 50.0);
//! pipeline.run_with_log(&mut world, |message| println!("{message}")).unwrap();
//! ```

pub mod biomes;
pub mod climate;
pub mod error;
pub mod grid;
pub mod noise;
pub mod pipeline;
pub mod rivers;
pub mod terrain;
pub mod world;

pub use biomes::{Biome, BiomeSelector, PhysicalTemplate, SimpleBiome};
pub use climate::{ClimateConfig, RainfallModel};
pub use error::{ConfigError, GenerationError, GridError, PipelineError};
pub use grid::Grid;
pub use crate::noise::{FractalNoiseConfig, NoiseEngine};
pub use pipeline::{standard_pipeline, Generator, WorldGenConfig, WorldGenerator};
pub use rivers::{RiverConfig, RiverNetwork};
pub use terrain::{HeightmapBias, HeightmapConfig};
pub use world::{CellAddress, GridWorld, World};
