// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network forward pass
//!
//! Hidden layers are sigmoid-activated; the final layer is linear. The
//! pass returns the full activation trace (input included) rather than
//! just the logits, because the weight-update engine needs the first-layer
//! pre-activation.

use crate::params::Layer;
use ndarray::Array1;

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid clamped away from 0 and 1, for use under log-likelihood losses.
pub fn truncated_sigmoid(x: f64) -> f64 {
    let epsilon = 1e-6;
    sigmoid(x).clamp(epsilon, 1.0 - epsilon)
}

/// Forward pass for the network.
///
/// Returns activations for all layers: entry 0 is `input`, followed by one
/// sigmoid activation per hidden layer, with the linear logits last.
/// NaN inputs (padded timesteps) propagate to NaN activations, which is
/// the expected sentinel behavior; length-aware consumers mask them.
pub fn forward(params: &[Layer], input: &Array1<f64>) -> Vec<Array1<f64>> {
    assert!(!params.is_empty(), "forward pass needs at least one layer");
    assert_eq!(
        input.len(),
        params[0].in_dim(),
        "input width must match the first layer"
    );

    let mut activations = Vec::with_capacity(params.len() + 1);
    activations.push(input.clone());

    let mut activation = input.clone();
    for layer in &params[..params.len() - 1] {
        activation = (activation.dot(&layer.weights) + &layer.bias).mapv(sigmoid);
        activations.push(activation.clone());
    }

    let last = &params[params.len() - 1];
    let logits = activation.dot(&last.weights) + &last.bias;
    activations.push(logits);
    activations
}
