//! Pipeline module for orchestrating world generation passes.
//!
//! Provides a trait-based architecture for modular generation passes that
//! are composed, in dependency order, into a complete generation pipeline.

mod presets;
mod stage;

pub use presets::{standard_pipeline, WorldGenConfig};
pub use stage::{Generator, WorldGenerator};
