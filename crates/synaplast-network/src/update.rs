// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight-update engine
//!
//! Applies a plasticity rule across all synapses of a weight matrix for
//! one trial. The reward term and the coefficient tensor are computed once
//! and broadcast across the doubly-nested sweep over input and output
//! units; the delta matrix must come out with exactly the weight matrix
//! shape.

use crate::params::{Layer, Params};
use ndarray::{Array1, Array2};
use synaplast_rules::{BiasUpdate, Coefficients, PlasticityRule};

/// Compute the per-synapse delta matrix for one weight matrix.
///
/// For every synapse `(i, j)` the rule is invoked with
/// `(x[i], reward - expected_reward, weights[i][j], coeffs)`. The reward
/// term and coefficients are shared by all synapses, not mapped.
///
/// # Panics
///
/// If `x` does not match the weight matrix input dimension, or if the
/// resulting delta shape does not equal the weight shape. A shape mismatch
/// signals a rule-shape bug and is fatal, never silently broadcast away.
pub fn weight_delta(
    x: &Array1<f64>,
    weights: &Array2<f64>,
    rule: &dyn PlasticityRule,
    coeffs: &Coefficients,
    reward: f64,
    expected_reward: f64,
) -> Array2<f64> {
    let (m, n) = weights.dim();
    assert_eq!(x.len(), m, "activation width must match weight rows");

    let reward_term = reward - expected_reward;

    // Outer sweep over input units, inner over output units. Order is
    // irrelevant: every synapse sees the same reward term and coefficients.
    let dw = Array2::from_shape_fn((m, n), |(i, j)| {
        rule.delta(x[i], reward_term, weights[[i, j]], coeffs)
    });

    assert_eq!(
        dw.shape(),
        weights.shape(),
        "dw and w should be of the same shape to prevent broadcasting while adding"
    );
    dw
}

/// One trial's parameter update from a full activation trace.
///
/// Plasticity happens in the first layer only: layer 0 gets the rule
/// applied with its pre-synaptic activation (`activations[0]`), every
/// deeper layer gets an all-zero delta. The bias delta is zero under
/// [`BiasUpdate::Frozen`]; under [`BiasUpdate::Plastic`] the rule is
/// applied per output unit with the activation fixed at 1.0.
pub fn update_params(
    params: &[Layer],
    activations: &[Array1<f64>],
    rule: &dyn PlasticityRule,
    coeffs: &Coefficients,
    reward: f64,
    expected_reward: f64,
    bias_update: BiasUpdate,
) -> Params {
    assert!(!params.is_empty(), "cannot update empty parameters");
    assert_eq!(
        activations.len(),
        params.len() + 1,
        "activation trace must cover input plus every layer"
    );

    let first = &params[0];
    let dw = weight_delta(&activations[0], &first.weights, rule, coeffs, reward, expected_reward);

    let reward_term = reward - expected_reward;
    let db = match bias_update {
        BiasUpdate::Frozen => Array1::zeros(first.bias.len()),
        BiasUpdate::Plastic => Array1::from_shape_fn(first.bias.len(), |j| {
            rule.delta(1.0, reward_term, first.bias[j], coeffs)
        }),
    };
    assert_eq!(
        db.shape(),
        first.bias.shape(),
        "db and b should be of the same shape to prevent broadcasting while adding"
    );

    let mut updated = Vec::with_capacity(params.len());
    updated.push(Layer {
        weights: &first.weights + &dw,
        bias: &first.bias + &db,
    });
    // No plasticity beyond the first layer: zero delta, carried unchanged.
    for layer in &params[1..] {
        updated.push(layer.clone());
    }
    updated
}
