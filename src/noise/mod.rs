//! Coherent noise generation.
//!
//! Simplex noise from the `noise` crate driven by our own permutation tables,
//! fractal layering, and the seed derivation that gives every pass its own
//! reproducible stream.

mod fractal;
mod seed;
mod simplex;

pub use fractal::{sample_noise_field, FractalNoiseConfig};
pub use seed::{derive_seed, label_hash, seeded_rng};
pub use simplex::{NoiseEngine, SeedTable, PERMUTATION_SIZE};
