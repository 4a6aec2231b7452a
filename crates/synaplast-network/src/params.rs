// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network parameters
//!
//! An ordered sequence of (weight matrix, bias vector) pairs, one per
//! layer. The weight-update engine mutates layer 0 only; deeper layers are
//! carried through simulations unchanged.

use crate::key::RngKey;
use ndarray::{Array1, Array2};
use rand_distr::{Distribution, Normal};

/// One network layer: `[in_dim x out_dim]` weights plus `[out_dim]` bias.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub weights: Array2<f64>,
    pub bias: Array1<f64>,
}

impl Layer {
    pub fn in_dim(&self) -> usize {
        self.weights.nrows()
    }

    pub fn out_dim(&self) -> usize {
        self.weights.ncols()
    }
}

/// Ordered per-layer parameters, input layer first.
pub type Params = Vec<Layer>;

/// Initialize parameters for the given layer widths.
///
/// Weights are Gaussian(0, `scale`); biases start at zero (bias plasticity
/// is frozen in the reference model, so a zero start keeps biases inert).
/// Each layer draws from its own split of `key`.
pub fn init_params(key: RngKey, layer_sizes: &[usize], scale: f64) -> Params {
    assert!(
        layer_sizes.len() >= 2,
        "layer_sizes needs at least an input and an output width"
    );
    assert!(
        scale > 0.0 && scale.is_finite(),
        "weight-init scale must be positive and finite"
    );

    let normal = Normal::new(0.0, scale).unwrap();
    let mut key = key;
    let mut params = Vec::with_capacity(layer_sizes.len() - 1);

    for (&m, &n) in layer_sizes.iter().zip(layer_sizes.iter().skip(1)) {
        let (layer_key, carried) = key.split();
        key = carried;
        let mut rng = layer_key.rng();
        params.push(Layer {
            weights: Array2::from_shape_fn((m, n), |_| normal.sample(&mut rng)),
            bias: Array1::zeros(n),
        });
    }
    params
}
