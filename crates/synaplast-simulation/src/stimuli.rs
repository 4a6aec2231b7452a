// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Odor stimulus distributions
//!
//! Each odor is a Gaussian over input space; sampling one draws an input
//! vector dimension by dimension.

use ndarray::{Array1, Array2};
use rand_distr::{Distribution, Normal};
use synaplast_network::RngKey;

/// Per-odor Gaussian input distributions. Rows index odors, columns index
/// input dimensions.
#[derive(Debug, Clone)]
pub struct OdorStimuli {
    mus: Array2<f64>,
    sigmas: Array2<f64>,
}

impl OdorStimuli {
    /// # Panics
    ///
    /// If shapes differ or any sigma is negative or non-finite.
    pub fn new(mus: Array2<f64>, sigmas: Array2<f64>) -> Self {
        assert_eq!(
            mus.dim(),
            sigmas.dim(),
            "odor means and sigmas must have matching shapes"
        );
        assert!(
            sigmas.iter().all(|&s| s >= 0.0 && s.is_finite()),
            "odor sigmas must be non-negative and finite"
        );
        Self { mus, sigmas }
    }

    /// Unit-variance odors centered at +/- `separation` on every input
    /// dimension, a common two-odor test setup.
    pub fn symmetric(num_odors: usize, input_dim: usize, separation: f64) -> Self {
        let mus = Array2::from_shape_fn((num_odors, input_dim), |(odor, _)| {
            if odor % 2 == 0 {
                separation
            } else {
                -separation
            }
        });
        let sigmas = Array2::ones((num_odors, input_dim));
        Self::new(mus, sigmas)
    }

    pub fn num_odors(&self) -> usize {
        self.mus.nrows()
    }

    pub fn input_dim(&self) -> usize {
        self.mus.ncols()
    }

    /// Draw one input vector for the given odor.
    pub fn sample(&self, key: RngKey, odor: usize) -> Array1<f64> {
        assert!(odor < self.num_odors(), "odor index out of range");
        let mut rng = key.rng();
        Array1::from_shape_fn(self.input_dim(), |dim| {
            Normal::new(self.mus[[odor, dim]], self.sigmas[[odor, dim]])
                .unwrap()
                .sample(&mut rng)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sample_is_deterministic_per_key() {
        let stimuli = OdorStimuli::symmetric(2, 3, 1.0);
        let key = RngKey::new(17);
        assert_eq!(stimuli.sample(key, 0), stimuli.sample(key, 0));
    }

    #[test]
    fn test_different_keys_differ() {
        let stimuli = OdorStimuli::symmetric(2, 3, 1.0);
        let (a, b) = RngKey::new(17).split();
        assert_ne!(stimuli.sample(a, 1), stimuli.sample(b, 1));
    }

    #[test]
    fn test_zero_sigma_returns_mean() {
        let stimuli = OdorStimuli::new(array![[2.0, -3.0]], array![[0.0, 0.0]]);
        let x = stimuli.sample(RngKey::new(0), 0);
        assert_eq!(x, array![2.0, -3.0]);
    }

    #[test]
    #[should_panic(expected = "matching shapes")]
    fn test_shape_mismatch_panics() {
        OdorStimuli::new(Array2::zeros((2, 3)), Array2::zeros((2, 2)));
    }
}
