// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Two-tier loading: the TOML file provides base values, environment
//! variables override them at runtime.

use crate::{ConfigError, ConfigResult, SimulationConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "synaplast_configuration.toml";

/// Find the synaplast configuration file
///
/// Search order:
/// 1. `SYNAPLAST_CONFIG_PATH` environment variable
/// 2. Current working directory: `./synaplast_configuration.toml`
/// 3. Ancestor directories (searches up to 5 levels for the workspace root)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("SYNAPLAST_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by SYNAPLAST_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    // 2. Search upward from the current directory
    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet SYNAPLAST_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for the file.
///
/// # Errors
///
/// Returns an error if the config file is not found or contains invalid TOML
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<SimulationConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: SimulationConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SYNAPLAST_TRIALS_PER_BLOCK` -> `experiment.trials_per_block`
/// - `SYNAPLAST_NUM_BLOCKS` -> `experiment.num_blocks`
/// - `SYNAPLAST_NUM_EXPS` -> `experiment.num_exps`
/// - `SYNAPLAST_MOVING_AVG_WINDOW` -> `experiment.moving_avg_window`
/// - `SYNAPLAST_INIT_SCALE` -> `experiment.init_scale`
/// - `SYNAPLAST_BIAS_PLASTICITY` -> `plasticity.bias_plasticity`
/// - `SYNAPLAST_LOG_LEVEL` -> `logging.log_level`
pub fn apply_environment_overrides(config: &mut SimulationConfig) {
    if let Ok(value) = env::var("SYNAPLAST_TRIALS_PER_BLOCK") {
        if let Ok(trials) = value.parse::<usize>() {
            config.experiment.trials_per_block = trials;
        }
    }
    if let Ok(value) = env::var("SYNAPLAST_NUM_BLOCKS") {
        if let Ok(blocks) = value.parse::<usize>() {
            config.experiment.num_blocks = blocks;
        }
    }
    if let Ok(value) = env::var("SYNAPLAST_NUM_EXPS") {
        if let Ok(exps) = value.parse::<usize>() {
            config.experiment.num_exps = exps;
        }
    }
    if let Ok(value) = env::var("SYNAPLAST_MOVING_AVG_WINDOW") {
        if let Ok(window) = value.parse::<usize>() {
            config.experiment.moving_avg_window = window;
        }
    }
    if let Ok(value) = env::var("SYNAPLAST_INIT_SCALE") {
        if let Ok(scale) = value.parse::<f64>() {
            config.experiment.init_scale = scale;
        }
    }
    if let Ok(value) = env::var("SYNAPLAST_BIAS_PLASTICITY") {
        config.plasticity.bias_plasticity =
            value.to_lowercase() == "true" || value == "1" || value.to_lowercase() == "yes";
    }
    if let Ok(value) = env::var("SYNAPLAST_LOG_LEVEL") {
        config.logging.log_level = value;
    }
}
