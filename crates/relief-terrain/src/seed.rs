//! Deterministic seeded draws.
//!
//! Every height-affecting draw reseeds the owned ChaCha8 stream from the seed
//! that governs it, so each drawn value is a pure function of that seed and
//! never of draw order. Midpoint seeds are combined commutatively, which is
//! what keeps a shared edge consistent between neighboring triangles.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::heightmap::{MAX_HEIGHT, MIN_HEIGHT};

/// Seedable random source owned by a single generator.
///
/// Wraps a `ChaCha8Rng` so the same seed produces the same stream on every
/// platform, independent of thread or process.
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Source positioned at the start of the stream for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rewind the stream to the start position for `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Next uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.random()
    }

    /// Next raw 64-bit draw, used to hand out independent sub-seeds.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Height displaced around `base` by a deviation drawn from `seed`.
    ///
    /// The stream is reseeded first, making the result a pure function of
    /// `(seed, base, max_deviation)`; earlier draws cannot shift it. The
    /// deviation is uniform in `[-max_deviation/2, +max_deviation/2)` and
    /// the result is clamped to the representable height range.
    pub fn displaced_height(&mut self, seed: u64, base: f32, max_deviation: f32) -> f32 {
        self.reseed(seed);
        let deviation = max_deviation * self.unit() - max_deviation * 0.5;
        (base + deviation).clamp(MIN_HEIGHT, MAX_HEIGHT)
    }
}

/// Combine two edge endpoint seeds into the seed of their midpoint.
///
/// Commutative: `combine_seeds(a, b) == combine_seeds(b, a)`, so two
/// triangles sharing an edge derive the same midpoint seed no matter which
/// of them splits the edge first. The sorted pair is mixed through SipHash
/// (std's `DefaultHasher`) for a well-distributed result.
pub fn combine_seeds(a: u64, b: u64) -> u64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = DefaultHasher::new();
    lo.hash(&mut hasher);
    hi.hash(&mut hasher);
    hasher.finish()
}
