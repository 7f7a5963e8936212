//! Seedable Xorshift64 generator used to scatter particles.
//!
//! Particle layouts must be reproducible: the same seed and the same sequence
//! of viewport sizes always yield the same origins, radii, and color indices.
//! The core step is pure integer arithmetic, so sequences match across
//! platforms.

use serde::{Deserialize, Serialize};

/// Xorshift64 (shifts 13, 7, 17). Same seed, same sequence.
///
/// A seed of 0 is a fixed point of the algorithm and is replaced with a
/// non-zero fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator. `seed == 0` uses the fallback seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max). Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        let v = min + self.next_f64() * (max - min);
        // Rounding can land exactly on `max` for wide ranges.
        if v >= max {
            min
        } else {
            v
        }
    }

    /// Uniform index in [0, len). Returns 0 for `len == 0` so callers picking
    /// from a non-empty palette never need to special-case it.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}
