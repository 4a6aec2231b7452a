// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Splittable random-number keys
//!
//! All randomness in a simulation is threaded through `RngKey` values:
//! a key is split before every stochastic draw, one half is consumed, the
//! other carries forward. No global or thread-local generator is ever
//! used, so two runs from the same root key are bit-identical.

use rand::rngs::StdRng;
use rand::SeedableRng;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer. Decorrelates sibling keys so independent draws
/// never share a stream.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A value-semantics RNG key, split before each stochastic draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RngKey(u64);

impl RngKey {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Derive two independent child keys. By convention the first child is
    /// consumed by the next draw and the second becomes the carried key.
    pub fn split(self) -> (RngKey, RngKey) {
        let consumed = mix(self.0.wrapping_add(GOLDEN_GAMMA));
        let carried = mix(self.0.wrapping_add(GOLDEN_GAMMA.wrapping_mul(2)));
        (RngKey(consumed), RngKey(carried))
    }

    /// Materialize a seeded generator for this key. Consuming a key twice
    /// replays the same stream, which is exactly the reproducibility
    /// guarantee the simulator relies on.
    pub fn rng(self) -> StdRng {
        StdRng::seed_from_u64(self.0)
    }
}
