//! Seeded 3D simplex noise.
//!
//! The simplex kernel comes from the `noise` crate; this module owns the
//! seeding, so a world can be reproduced from an integer, a string or a raw
//! permutation table.

use ::noise::core::simplex::simplex_3d;
use ::noise::permutationtable::NoiseHasher;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::fractal::FractalNoiseConfig;
use super::seed::{derive_seed, label_hash};

/// Number of entries in a permutation table.
pub const PERMUTATION_SIZE: usize = 256;

/// A 256-entry permutation table used to hash lattice corners.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SeedTable {
    values: [u8; PERMUTATION_SIZE],
}

impl SeedTable {
    /// Seeded shuffle of `0..=255`.
    pub fn shuffled(seed: u64) -> Self {
        let mut values = [0u8; PERMUTATION_SIZE];
        for (i, slot) in values.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        values.shuffle(&mut rng);
        Self { values }
    }

    pub fn values(&self) -> &[u8; PERMUTATION_SIZE] {
        &self.values
    }
}

impl NoiseHasher for SeedTable {
    /// Folds the coordinates through the table, xor-ing in one coordinate
    /// per lookup.
    fn hash(&self, to_hash: &[isize]) -> usize {
        let index = to_hash
            .iter()
            .map(|&a| (a & 0xff) as usize)
            .reduce(|a, b| self.values[a] as usize ^ b)
            .unwrap_or(0);
        self.values[index] as usize
    }
}

/// A coherent-noise sampler owning its own permutation table.
///
/// Instances are independent and immutable after construction, so one engine
/// can be shared across threads while a field is sampled in parallel.
#[derive(Clone)]
pub struct NoiseEngine {
    table: SeedTable,
}

impl std::fmt::Debug for NoiseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseEngine")
            .field("perm_head", &&self.table.values[..8])
            .finish()
    }
}

impl NoiseEngine {
    /// Creates an engine whose permutation table is a seeded shuffle of `0..=255`.
    pub fn new(seed: u64) -> Self {
        Self {
            table: SeedTable::shuffled(seed),
        }
    }

    /// Creates the engine for one named noise layer of a world.
    ///
    /// Each layer gets its own table, so e.g. the height and rain fields of
    /// the same world are uncorrelated.
    pub fn for_layer(world_seed: u64, label: &str) -> Self {
        Self::new(derive_seed(world_seed, label))
    }

    /// Creates an engine from a string seed.
    pub fn from_str_seed(seed: &str) -> Self {
        Self::new(label_hash(seed))
    }

    /// Creates an engine from a caller-supplied permutation table.
    ///
    /// The table does not have to be a true permutation; any byte table
    /// produces valid (if lower quality) noise.
    pub fn from_permutation(values: [u8; PERMUTATION_SIZE]) -> Self {
        Self {
            table: SeedTable { values },
        }
    }

    /// Returns the permutation table.
    pub fn permutation(&self) -> &[u8] {
        &self.table.values
    }

    /// Samples a single layer of simplex noise. Output lies within [-1, 1].
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let (value, _) = simplex_3d([x as f64, y as f64, z as f64].into(), &self.table);
        value as f32
    }

    /// Sums `octaves` layers of noise.
    ///
    /// Coordinates are divided by `scale` first; each layer multiplies the
    /// coordinates by `lacunarity` and the amplitude by `persistence`.
    pub fn coherent_noise(&self, x: f32, y: f32, z: f32, config: &FractalNoiseConfig) -> f32 {
        let scale = config.scale.max(f32::EPSILON);
        let mut vx = x / scale;
        let mut vy = y / scale;
        let mut vz = z / scale;
        let mut amplitude = config.amplitude;

        let mut total = 0.0f32;
        for _ in 0..config.octaves {
            total += self.sample(vx, vy, vz) * amplitude;

            vx *= config.lacunarity;
            vy *= config.lacunarity;
            vz *= config.lacunarity;
            amplitude *= config.persistence;
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_reproducibility() {
        let a = NoiseEngine::new(12345);
        let b = NoiseEngine::new(12345);
        let config = FractalNoiseConfig::heightmap();

        for (x, y) in [(0.0, 0.0), (13.5, 7.25), (120.0, 3.0), (-40.0, 55.5)] {
            assert_eq!(
                a.coherent_noise(x, y, 0.0, &config),
                b.coherent_noise(x, y, 0.0, &config),
                "Same seed and position should produce same result"
            );
        }
    }

    #[test]
    fn test_seeded_values_are_stable() {
        let engine = NoiseEngine::new(12345);
        assert_eq!(&engine.permutation()[..8], &[212, 165, 77, 195, 189, 206, 92, 118]);

        for ((x, y, z), expected) in [
            ((0.3, 1.7, 2.2), -0.072_376_355),
            ((13.25, -4.5, 0.75), -0.089_064_59),
            ((100.5, 37.25, 0.0), -0.032_259_73),
        ] {
            let v = engine.sample(x, y, z);
            assert!((v - expected).abs() < 1e-6, "sample({x}, {y}, {z}) = {v}");
        }

        let config = FractalNoiseConfig::heightmap();
        for ((x, y), expected) in [
            ((13.5, 7.25), -0.223_816_1),
            ((120.0, 3.0), 0.262_554_76),
            ((-40.0, 55.5), -0.091_393_15),
        ] {
            let v = engine.coherent_noise(x, y, 0.0, &config);
            assert!((v - expected).abs() < 1e-6, "coherent_noise({x}, {y}) = {v}");
        }
    }

    #[test]
    fn test_table_hashes_like_the_noise_crate() {
        let engine = NoiseEngine::new(5);
        let table = engine.table;
        let p = table.values();
        let expected = p[(p[(p[3] ^ 250) as usize] ^ 7) as usize] as usize;
        // -6 wraps to 250 in the low byte.
        assert_eq!(table.hash(&[3, -6, 7]), expected);
        assert_eq!(table.hash(&[259, 250, 263]), expected);
    }

    #[test]
    fn test_different_seeds_produce_different_tables() {
        let a = NoiseEngine::new(1);
        let b = NoiseEngine::new(2);
        assert_ne!(a.permutation(), b.permutation());
    }

    #[test]
    fn test_permutation_is_a_permutation() {
        let engine = NoiseEngine::new(99);
        let mut seen = [false; PERMUTATION_SIZE];
        for &v in engine.permutation() {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_string_seed_matches_itself() {
        let a = NoiseEngine::from_str_seed("valley of the winds");
        let b = NoiseEngine::from_str_seed("valley of the winds");
        assert_eq!(a.permutation(), b.permutation());
        assert_eq!(a.sample(0.3, 0.7, 0.1), b.sample(0.3, 0.7, 0.1));
    }

    #[test]
    fn test_layers_are_independent() {
        let height = NoiseEngine::for_layer(10, "height");
        assert_eq!(height.permutation(), NoiseEngine::for_layer(10, "height").permutation());
        assert_ne!(height.permutation(), NoiseEngine::for_layer(10, "rain").permutation());
    }

    #[test]
    fn test_raw_table_is_used_verbatim() {
        let mut table = [0u8; PERMUTATION_SIZE];
        for (i, v) in table.iter_mut().enumerate() {
            *v = (255 - i) as u8;
        }
        let engine = NoiseEngine::from_permutation(table);
        assert_eq!(engine.permutation(), &table[..]);
    }

    #[test]
    fn test_noise_range() {
        let engine = NoiseEngine::new(7);
        for i in 0..500 {
            let f = i as f32 * 0.37;
            let v = engine.sample(f, f * 0.5 - 3.0, 1.5);
            assert!(v.abs() <= 1.0, "noise value {} out of range", v);
        }
    }

    #[test]
    fn test_noise_is_coherent() {
        let engine = NoiseEngine::new(3);
        let a = engine.sample(1.0, 2.0, 0.0);
        let b = engine.sample(1.001, 2.0, 0.0);
        assert!((a - b).abs() < 0.05);
    }

    #[test]
    fn test_zero_octaves_is_silent() {
        let engine = NoiseEngine::new(3);
        let config = FractalNoiseConfig {
            octaves: 0,
            ..FractalNoiseConfig::default()
        };
        assert_eq!(engine.coherent_noise(5.0, 5.0, 0.0, &config), 0.0);
    }
}
