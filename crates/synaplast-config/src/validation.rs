// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent, within valid ranges, and don't conflict with each other.

use crate::{ConfigError, ConfigResult, SimulationConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Network shape (at least input and output layer, no zero-width layer)
/// - Trial/block counts and moving-average window (all nonzero)
/// - Reward ratios (one per block, each within [0, 1])
/// - Weight-init scale and coefficient-tensor shape
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &SimulationConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_network_shape(config, &mut errors);
    validate_trial_structure(config, &mut errors);
    validate_reward_schedule(config, &mut errors);
    validate_plasticity(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Validate layer sizes describe a usable network
fn validate_network_shape(config: &SimulationConfig, errors: &mut Vec<ConfigValidationError>) {
    let layer_sizes = &config.experiment.layer_sizes;

    if layer_sizes.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "experiment.layer_sizes".to_string(),
        });
        return;
    }
    if layer_sizes.len() < 2 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.layer_sizes".to_string(),
            reason: "must have at least an input and an output layer".to_string(),
        });
    }
    if layer_sizes.iter().any(|&width| width == 0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.layer_sizes".to_string(),
            reason: "layer widths must be nonzero".to_string(),
        });
    }
}

/// Validate trial/block counts and the expected-reward window
fn validate_trial_structure(config: &SimulationConfig, errors: &mut Vec<ConfigValidationError>) {
    let exp = &config.experiment;

    if exp.trials_per_block == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.trials_per_block".to_string(),
            reason: "must be nonzero".to_string(),
        });
    }
    if exp.num_blocks == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.num_blocks".to_string(),
            reason: "must be nonzero".to_string(),
        });
    }
    if exp.num_exps == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.num_exps".to_string(),
            reason: "must be nonzero".to_string(),
        });
    }
    if exp.num_odors == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.num_odors".to_string(),
            reason: "must be nonzero".to_string(),
        });
    }
    if exp.moving_avg_window == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.moving_avg_window".to_string(),
            reason: "must be nonzero".to_string(),
        });
    }
}

/// Validate reward ratios line up with blocks and are probabilities
fn validate_reward_schedule(config: &SimulationConfig, errors: &mut Vec<ConfigValidationError>) {
    let exp = &config.experiment;

    if exp.reward_ratios.len() != exp.num_blocks {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.reward_ratios".to_string(),
            reason: format!(
                "must have one entry per block ({} entries for {} blocks)",
                exp.reward_ratios.len(),
                exp.num_blocks
            ),
        });
    }
    for (block, &ratio) in exp.reward_ratios.iter().enumerate() {
        if !(0.0..=1.0).contains(&ratio) {
            errors.push(ConfigValidationError::InvalidValue {
                field: format!("experiment.reward_ratios[{}]", block),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }
    }
}

/// Validate weight-init scale and the coefficient-tensor shape
fn validate_plasticity(config: &SimulationConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.experiment.init_scale <= 0.0 || !config.experiment.init_scale.is_finite() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "experiment.init_scale".to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    if config.plasticity.coeff_shape.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "plasticity.coeff_shape".to_string(),
        });
    }
    if config.plasticity.coeff_shape.iter().any(|&dim| dim == 0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "plasticity.coeff_shape".to_string(),
            reason: "dimensions must be nonzero".to_string(),
        });
    }
}
