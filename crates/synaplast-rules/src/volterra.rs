// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Truncated Volterra expansion rule
//!
//! The weight delta is a degree-2 polynomial in pre-synaptic activation,
//! reward-prediction error, and current weight:
//!
//! `dw = sum over a,b,c in 0..3 of C[a][b][c] * x^a * r^b * w^c`
//!
//! With 27 coefficients this family covers the classical local rules as
//! special cases (e.g. `C[1][1][0] = 1` is pure reward covariance) and is
//! the parameterization fitted to behavioral data in the reference
//! experiments.

use crate::{Coefficients, PlasticityRule};

const VOLTERRA_SHAPE: [usize; 3] = [3, 3, 3];

/// Volterra-series plasticity rule over a `[3, 3, 3]` coefficient tensor.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolterraRule;

impl PlasticityRule for VolterraRule {
    fn delta(&self, activation: f64, reward_term: f64, weight: f64, coeffs: &Coefficients) -> f64 {
        // Wrong coefficient shape is a fatal usage error, never silently
        // corrected.
        assert_eq!(
            coeffs.shape(),
            &VOLTERRA_SHAPE,
            "VolterraRule requires a [3, 3, 3] coefficient tensor, got {:?}",
            coeffs.shape()
        );

        let x_powers = [1.0, activation, activation * activation];
        let r_powers = [1.0, reward_term, reward_term * reward_term];
        let w_powers = [1.0, weight, weight * weight];

        let coeffs = coeffs.as_array();
        let mut delta = 0.0;
        for (a, &xp) in x_powers.iter().enumerate() {
            for (b, &rp) in r_powers.iter().enumerate() {
                for (c, &wp) in w_powers.iter().enumerate() {
                    delta += coeffs[[a, b, c]] * xp * rp * wp;
                }
            }
        }
        delta
    }

    fn name(&self) -> &str {
        "VolterraRule"
    }
}
