// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Evaluation harness
//!
//! Generates one fresh experiment under ground-truth ("generation")
//! coefficients, then replays the very same recorded trials through the
//! scan simulator twice — once per coefficient set — so generation and
//! fitted-model trajectories can be compared directly.

use crate::data::{mask_logits, ExperimentData};
use crate::fly::simulate_fly_experiment;
use crate::scan::simulate;
use crate::stimuli::OdorStimuli;
use ndarray::Array2;
use synaplast_config::SimulationConfig;
use synaplast_network::{init_params, RngKey};
use synaplast_rules::{BiasUpdate, Coefficients, PlasticityRule};
use tracing::info;

/// Weight-init scale for evaluation runs; smaller than the training
/// default so early decision probabilities stay near chance.
const EVAL_INIT_SCALE: f64 = 0.01;

/// One coefficient set's view of the shared experiment.
#[derive(Debug, Clone)]
pub struct CoefficientEval {
    /// Logits `[num_trials, max_len]`, zeroed at and beyond each trial's
    /// true length
    pub logits: Array2<f64>,
    /// First-layer weight matrix after every trial
    pub weight_trajectory: Vec<Array2<f64>>,
}

/// Generation-vs-model comparison over one fresh experiment.
#[derive(Debug, Clone)]
pub struct EvalOutput {
    pub generation: CoefficientEval,
    pub model: CoefficientEval,
    /// The shared trial data both simulations consumed
    pub data: ExperimentData,
}

/// Evaluate logits and weight trajectories for a generation and a model
/// coefficient set over a single new experiment.
///
/// Fresh parameters are initialized from `key`; trial data is generated
/// once with the generation coefficients, then both coefficient sets are
/// simulated over identical inputs, rewards, and expected rewards.
/// Logits are masked to zero beyond each trial's true length, so padding
/// positions contribute nothing downstream.
///
/// # Panics
///
/// If the configured network is not single-layer with one output unit
/// (`layer_sizes = [input_dim, 1]`) — the fly generation process drives
/// one decision unit from the first-layer weights.
pub fn evaluate(
    key: RngKey,
    cfg: &SimulationConfig,
    generation_coeffs: &Coefficients,
    model_coeffs: &Coefficients,
    rule: &dyn PlasticityRule,
    stimuli: &OdorStimuli,
) -> EvalOutput {
    let exp = &cfg.experiment;
    assert!(
        exp.layer_sizes.len() == 2 && exp.layer_sizes[1] == 1,
        "evaluation generates data through a single decision unit; \
         layer_sizes must be [input_dim, 1]"
    );

    let (init_key, key) = key.split();
    let params = init_params(init_key, &exp.layer_sizes, EVAL_INIT_SCALE);
    let bias_update = if cfg.plasticity.bias_plasticity {
        BiasUpdate::Plastic
    } else {
        BiasUpdate::Frozen
    };

    // One fresh experiment under the generation coefficients.
    let (gen_key, _key) = key.split();
    let generated = simulate_fly_experiment(
        gen_key,
        params[0].weights.clone(),
        rule,
        generation_coeffs,
        stimuli,
        exp,
    );
    let data = generated.data;

    // Trial lengths are recoverable from the NaN padding; they must agree
    // with the recorded ones.
    let lengths = ExperimentData::trial_lengths_from_decisions(&data.decisions);
    assert_eq!(lengths, data.trial_lengths, "padding and lengths disagree");

    info!(
        num_trials = data.num_trials(),
        longest_trial = data.max_len(),
        "evaluating generation and model coefficients"
    );

    let run = |coeffs: &Coefficients| {
        let out = simulate(&params, rule, coeffs, &data, bias_update);
        CoefficientEval {
            logits: mask_logits(&out.squeezed_logits(), &data.trial_lengths),
            weight_trajectory: out.first_layer_weight_trajectory(),
        }
    };

    let generation = run(generation_coeffs);
    let model = run(model_coeffs);

    EvalOutput {
        generation,
        model,
        data,
    }
}
