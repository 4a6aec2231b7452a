// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # synaplast — reward-modulated synaptic plasticity simulation
//!
//! Small-scale research simulations of parameterized synaptic plasticity
//! rules: given a local learning rule (a function of pre-synaptic
//! activation, reward-prediction error, current weight, and a coefficient
//! tensor), simulate trial-by-trial weight updates, record full weight and
//! activation trajectories, and compare ground-truth against fitted
//! coefficient sets.
//!
//! ## Components
//! - [`config`]: TOML configuration with env overrides and validation
//! - [`rules`]: the plasticity-rule plugin system (trait + Volterra rule)
//! - [`network`]: forward pass and the per-synapse weight-update engine
//! - [`simulation`]: sequential trial scan, fly experiment, evaluation
//!
//! ## Quick start
//!
//! ```rust
//! use synaplast::prelude::*;
//!
//! let key = RngKey::new(42);
//! let (k_init, _) = key.split();
//! let params = init_params(k_init, &[2, 1], 0.1);
//! let rule = VolterraRule;
//! let coeffs = Coefficients::reward_covariance();
//! assert_eq!(rule.delta(0.5, 1.0, 0.0, &coeffs), 0.5);
//! let _ = params;
//! ```

pub use synaplast_config as config;
pub use synaplast_network as network;
pub use synaplast_rules as rules;
pub use synaplast_simulation as simulation;

/// Commonly used items, re-exported in one place.
pub mod prelude {
    pub use synaplast_config::{load_config, validate_config, SimulationConfig};
    pub use synaplast_network::{
        forward, init_params, update_params, weight_delta, Layer, Params, RngKey,
    };
    pub use synaplast_rules::{BiasUpdate, Coefficients, NoPlasticity, PlasticityRule, VolterraRule};
    pub use synaplast_simulation::{
        evaluate, mask_logits, simulate, simulate_fly_experiment, EvalOutput, ExperimentData,
        FlyExperimentOutput, OdorStimuli, SimulationOutput,
    };
}
