// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Rule coefficient tensors
//!
//! A `Coefficients` tensor parameterizes a plasticity rule. Its shape is
//! rule-specific and opaque to the weight-update engine; one tensor is
//! shared read-only across all synapses and all trials of a simulation.

use ndarray::{ArrayD, Dimension};

/// Opaque, read-only coefficient tensor for a plasticity rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients(ArrayD<f64>);

impl Coefficients {
    /// All-zero coefficient tensor with the given shape
    pub fn zeros(shape: &[usize]) -> Self {
        Self(ArrayD::zeros(shape))
    }

    /// Wrap an existing array of any dimensionality
    pub fn from_array<D: Dimension>(array: ndarray::Array<f64, D>) -> Self {
        Self(array.into_dyn())
    }

    /// All-zero tensor of the Volterra rule shape `[3, 3, 3]`
    pub fn volterra_zeros() -> Self {
        Self::zeros(&[3, 3, 3])
    }

    /// Volterra ground-truth set used for data generation in the reference
    /// experiments: `C[1][1][0] = 1`, i.e. `dw = x * (r - r̄)`.
    pub fn reward_covariance() -> Self {
        let mut coeffs = ArrayD::zeros(vec![3, 3, 3]);
        coeffs[[1, 1, 0]] = 1.0;
        Self(coeffs)
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn as_array(&self) -> &ArrayD<f64> {
        &self.0
    }
}
