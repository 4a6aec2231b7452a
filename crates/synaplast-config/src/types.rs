// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `synaplast_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub experiment: ExperimentConfig,
    pub plasticity: PlasticityConfig,
    pub logging: LoggingConfig,
}

/// Experiment structure: network shape, block/trial counts, reward schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Ordered layer widths, input first. Length must be >= 2.
    pub layer_sizes: Vec<usize>,
    pub trials_per_block: usize,
    pub num_blocks: usize,
    /// Number of independently seeded experiments to run
    pub num_exps: usize,
    /// Per-block Bernoulli reward-replenishment ratio, one entry per block
    pub reward_ratios: Vec<f64>,
    pub num_odors: usize,
    /// Window length for the expected-reward moving average
    pub moving_avg_window: usize,
    /// Std-dev for Gaussian weight initialization
    pub init_scale: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            layer_sizes: vec![2, 1],
            trials_per_block: 20,
            num_blocks: 2,
            num_exps: 1,
            reward_ratios: vec![0.2, 0.8],
            num_odors: 2,
            moving_avg_window: 10,
            init_scale: 0.1,
        }
    }
}

impl ExperimentConfig {
    /// Total trials across all blocks
    pub fn total_trials(&self) -> usize {
        self.num_blocks * self.trials_per_block
    }

    /// Input dimensionality (first layer width)
    pub fn input_dim(&self) -> usize {
        self.layer_sizes.first().copied().unwrap_or(0)
    }
}

/// Plasticity-rule configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlasticityConfig {
    /// Whether the bias vector receives plasticity updates. The reference
    /// model freezes biases (delta fixed at zero); this is a modeling
    /// choice, exposed here rather than hardcoded.
    pub bias_plasticity: bool,
    /// Shape of the rule coefficient tensor
    pub coeff_shape: Vec<usize>,
}

impl Default for PlasticityConfig {
    fn default() -> Self {
        Self {
            bias_plasticity: false,
            coeff_shape: vec![3, 3, 3],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
    pub print_trial_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "WARNING".to_string(),
            print_trial_info: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_experiment_shape() {
        let cfg = ExperimentConfig::default();
        assert_eq!(cfg.total_trials(), 40);
        assert_eq!(cfg.input_dim(), 2);
        assert_eq!(cfg.reward_ratios.len(), cfg.num_blocks);
    }

    #[test]
    fn test_bias_plasticity_off_by_default() {
        assert!(!PlasticityConfig::default().bias_plasticity);
    }
}
