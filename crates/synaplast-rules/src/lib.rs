// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # synaplast Plasticity Rules
//!
//! This crate implements the plasticity-rule capability consumed by the
//! weight-update engine.
//!
//! ## Architecture
//! - Trait-based plugin system: the engine treats rules as opaque,
//!   element-wise units and never inspects their internals
//! - Coefficient tensors are rule-specific and opaque to the engine
//! - Rules must be pure and side-effect-free so they can be applied per
//!   synapse in any order

pub mod coefficients;
pub mod volterra;

pub use coefficients::Coefficients;
pub use volterra::VolterraRule;

/// Trait for plasticity rules
/// This allows different plasticity algorithms to be plugged in
pub trait PlasticityRule: Send + Sync {
    /// Compute the weight delta for a single synapse.
    ///
    /// * `activation` - pre-synaptic activation feeding the synapse
    /// * `reward_term` - reward minus expected reward (prediction error)
    /// * `weight` - current synaptic weight
    /// * `coeffs` - rule coefficient tensor, shared across all synapses
    ///
    /// Must be pure: same inputs, same delta, no side effects.
    fn delta(&self, activation: f64, reward_term: f64, weight: f64, coeffs: &Coefficients) -> f64;

    /// Get the name of this plasticity rule
    fn name(&self) -> &str;
}

/// Rule that never changes any weight. Useful as an experimental control
/// and for freezing a network mid-study.
pub struct NoPlasticity;

impl PlasticityRule for NoPlasticity {
    fn delta(
        &self,
        _activation: f64,
        _reward_term: f64,
        _weight: f64,
        _coeffs: &Coefficients,
    ) -> f64 {
        0.0
    }

    fn name(&self) -> &str {
        "NoPlasticity"
    }
}

/// Whether bias vectors participate in plasticity updates.
///
/// The reference model deliberately freezes biases (delta fixed at zero).
/// That is a modeling choice, so it is carried as an explicit switch
/// instead of being hardcoded in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiasUpdate {
    /// Bias deltas are all-zero (reference behavior)
    #[default]
    Frozen,
    /// Biases are updated by the rule with the activation fixed at 1.0
    Plastic,
}
