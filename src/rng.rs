//! Seeded randomness.
//!
//! Every algorithm that needs randomness (reduction's randomized rule
//! sampling, the local search's random uncovered-element draws, the LNS's
//! tie-breaking) is driven by a single `StdRng` seeded from the user's
//! `--seed`. Parallel neighbour-precomputation workers (§5) each get a
//! sub-seed derived deterministically from the parent seed and their
//! worker index, so a run is reproducible independent of how many threads
//! happen to be available.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::types::Seed;

/// Create the top-level generator for a run from a user-provided seed.
pub fn from_seed(seed: Seed) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive a deterministic sub-seed for worker `index` of `count` workers.
///
/// Uses a fixed-point mix (splitmix64) rather than drawing from the parent
/// generator, so the set of sub-seeds does not depend on the order in
/// which workers are spawned.
pub fn sub_seed(parent_seed: Seed, index: usize) -> Seed {
    let mut z = parent_seed
        .wrapping_add(0x9E3779B97F4A7C15u64.wrapping_mul(index as u64 + 1));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "tests_unit/rng.rs"]
mod tests;
