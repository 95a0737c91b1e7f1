//! Seeded gradient noise for terrain generation.
//!
//! Wraps the `noise` crate's Perlin generator behind a seed normalization step
//! so any numeric seed (including fractional ones) maps to a stable field.

use noise::{NoiseFn, Perlin};

/// Normalize an arbitrary numeric seed into the generator's seed space.
///
/// Seeds strictly between 0 and 1 are scaled by 65536 first, then floored.
/// Values below 256 are widened by OR-ing in a copy shifted left one byte so
/// small seeds still perturb both halves of the permutation hash. Non-finite
/// seeds collapse to zero.
pub fn normalize_seed(seed: f64) -> u32 {
    let mut value = seed;
    if value > 0.0 && value < 1.0 {
        value *= 65536.0;
    }
    let mut normalized = if value.is_finite() {
        value.floor() as i64
    } else {
        0
    };
    if normalized < 256 {
        normalized |= normalized << 8;
    }
    normalized as u32
}

/// Deterministic continuous scalar field over 2D/3D coordinates.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Create a field from a numeric seed. The same seed always yields the same field.
    pub fn new(seed: f64) -> Self {
        let seed = normalize_seed(seed);
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// Seed after normalization.
    pub fn normalized_seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field on the `z = 0` plane.
    #[inline]
    pub fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self.noise_3d(x, y, 0.0)
    }

    /// Sample the field in 3D.
    #[inline]
    pub fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}
