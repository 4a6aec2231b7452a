// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sequential trial scan
//!
//! Advances through the trials of a recorded experiment in order,
//! threading the network parameters as carried state. Each trial's update
//! depends on the previous trial's weights, so trials are never reordered;
//! timesteps within one trial are order-independent because only the
//! decision timestep feeds the weight update.

use crate::data::ExperimentData;
use ndarray::{s, Array2, Array3};
use synaplast_network::{forward, update_params, Layer, Params};
use synaplast_rules::{BiasUpdate, Coefficients, PlasticityRule};
use tracing::debug;

/// Full record of one simulated experiment.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// Parameter snapshot after every trial, in trial order. Never mutated
    /// after the scan; entry `t` is the state carried into trial `t + 1`.
    pub param_trajectory: Vec<Params>,
    /// Raw (unmasked) logits, `[num_trials, max_len, out_dim]`
    pub logits: Array3<f64>,
}

impl SimulationOutput {
    /// Logits with the trailing unit axis removed, `[num_trials, max_len]`.
    ///
    /// # Panics
    ///
    /// If the network has more than one output unit.
    pub fn squeezed_logits(&self) -> Array2<f64> {
        assert_eq!(
            self.logits.dim().2,
            1,
            "squeeze requires a single output unit"
        );
        self.logits.slice(s![.., .., 0]).to_owned()
    }

    /// First-layer weight matrices over trials, the tensor compared when
    /// fitting coefficient sets.
    pub fn first_layer_weight_trajectory(&self) -> Vec<Array2<f64>> {
        self.param_trajectory
            .iter()
            .map(|params| params[0].weights.clone())
            .collect()
    }
}

/// Simulate an experiment with given plasticity coefficients.
///
/// For every trial, in order:
/// 1. forward pass for every (padded) timestep of the trial;
/// 2. select the activation trace at the trial's decision timestep
///    (`trial_length - 1`); padded timesteps are ignored for plasticity;
/// 3. apply the weight update with the trial's recorded reward and
///    expected reward;
/// 4. record the updated parameters and the trial's logit rows.
///
/// The scan itself draws no randomness: identical inputs produce
/// bit-identical trajectories.
pub fn simulate(
    initial_params: &[Layer],
    rule: &dyn PlasticityRule,
    coeffs: &Coefficients,
    data: &ExperimentData,
    bias_update: BiasUpdate,
) -> SimulationOutput {
    assert!(!initial_params.is_empty(), "network needs at least one layer");
    assert_eq!(
        data.input_dim(),
        initial_params[0].in_dim(),
        "experiment input width must match the network"
    );

    let num_trials = data.num_trials();
    let max_len = data.max_len();
    let out_dim = initial_params[initial_params.len() - 1].out_dim();

    debug!(
        rule = rule.name(),
        num_trials, max_len, "starting trial scan"
    );

    let mut params: Params = initial_params.to_vec();
    let mut param_trajectory = Vec::with_capacity(num_trials);
    let mut logits = Array3::zeros((num_trials, max_len, out_dim));

    for t in 0..num_trials {
        let length = data.trial_lengths[t];
        assert!(
            length >= 1 && length <= max_len,
            "trial length must fall within the padded window"
        );

        // Forward every timestep against the weights carried into this
        // trial. Only the decision timestep's trace feeds plasticity.
        let mut decision_trace = None;
        for step in 0..max_len {
            let x = data.xs.slice(s![t, step, ..]).to_owned();
            let trace = forward(&params, &x);
            logits
                .slice_mut(s![t, step, ..])
                .assign(trace.last().unwrap());
            if step == length - 1 {
                decision_trace = Some(trace);
            }
        }

        let decision_trace = decision_trace.unwrap();
        params = update_params(
            &params,
            &decision_trace,
            rule,
            coeffs,
            data.rewards[t],
            data.expected_rewards[t],
            bias_update,
        );
        param_trajectory.push(params.clone());
    }

    debug!(num_trials, "trial scan complete");
    SimulationOutput {
        param_trajectory,
        logits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TrialRecord;
    use ndarray::array;
    use synaplast_network::{init_params, RngKey};
    use synaplast_rules::VolterraRule;

    fn fixed_experiment(rewards: &[f64]) -> ExperimentData {
        let trials: Vec<TrialRecord> = rewards
            .iter()
            .enumerate()
            .map(|(t, &reward)| TrialRecord {
                inputs: vec![array![1.0, 0.5], array![0.5, 1.0]],
                odors: vec![0, 1],
                decisions: vec![0.0, 1.0],
                reward,
                expected_reward: 0.5 + (t as f64) * 0.01,
            })
            .collect();
        ExperimentData::from_trials(&trials)
    }

    #[test]
    fn test_trajectory_one_entry_per_trial() {
        let params = init_params(RngKey::new(2), &[2, 1], 0.1);
        let data = fixed_experiment(&[1.0, 0.0, 1.0]);
        let out = simulate(
            &params,
            &VolterraRule,
            &Coefficients::reward_covariance(),
            &data,
            BiasUpdate::Frozen,
        );
        assert_eq!(out.param_trajectory.len(), 3);
        assert_eq!(out.logits.dim(), (3, 2, 1));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let params = init_params(RngKey::new(2), &[2, 3, 1], 0.1);
        let data = fixed_experiment(&[1.0, 0.0, 1.0, 1.0]);
        let coeffs = Coefficients::reward_covariance();
        let a = simulate(&params, &VolterraRule, &coeffs, &data, BiasUpdate::Frozen);
        let b = simulate(&params, &VolterraRule, &coeffs, &data, BiasUpdate::Frozen);
        assert_eq!(a.param_trajectory, b.param_trajectory);
        assert_eq!(a.logits, b.logits);
    }

    #[test]
    fn test_weights_carried_between_trials() {
        let params = init_params(RngKey::new(7), &[2, 1], 0.1);
        let data = fixed_experiment(&[1.0, 1.0]);
        let out = simulate(
            &params,
            &VolterraRule,
            &Coefficients::reward_covariance(),
            &data,
            BiasUpdate::Frozen,
        );
        // Positive reward term and positive inputs keep moving the weights
        let w0 = &out.param_trajectory[0][0].weights;
        let w1 = &out.param_trajectory[1][0].weights;
        assert_ne!(w0, &params[0].weights);
        assert_ne!(w1, w0);
    }

    #[test]
    fn test_perturbing_trial_k_leaves_earlier_trials_unchanged() {
        let params = init_params(RngKey::new(5), &[2, 1], 0.1);
        let coeffs = Coefficients::reward_covariance();
        let base = fixed_experiment(&[1.0, 0.0, 1.0, 0.0]);
        let mut perturbed = base.clone();
        perturbed.rewards[2] = 0.0; // flip trial 2's reward

        let a = simulate(&params, &VolterraRule, &coeffs, &base, BiasUpdate::Frozen);
        let b = simulate(&params, &VolterraRule, &coeffs, &perturbed, BiasUpdate::Frozen);

        // Trials before the perturbation are bit-identical
        assert_eq!(a.param_trajectory[0], b.param_trajectory[0]);
        assert_eq!(a.param_trajectory[1], b.param_trajectory[1]);
        // The perturbed trial and everything after it diverge
        assert_ne!(a.param_trajectory[2], b.param_trajectory[2]);
        assert_ne!(a.param_trajectory[3], b.param_trajectory[3]);
    }

    #[test]
    fn test_padded_timesteps_do_not_feed_plasticity() {
        // Two experiments identical up to each trial's true length but with
        // different padding content must produce identical trajectories.
        let trial = |pad: f64| TrialRecord {
            inputs: vec![array![1.0, 0.5], array![pad, pad]],
            odors: vec![0, 0],
            decisions: vec![1.0, f64::NAN],
            reward: 1.0,
            expected_reward: 0.0,
        };
        let mut a = ExperimentData::from_trials(&[trial(7.0)]);
        let mut b = ExperimentData::from_trials(&[trial(-7.0)]);
        a.trial_lengths = vec![1];
        b.trial_lengths = vec![1];

        let params = init_params(RngKey::new(3), &[2, 1], 0.1);
        let coeffs = Coefficients::reward_covariance();
        let out_a = simulate(&params, &VolterraRule, &coeffs, &a, BiasUpdate::Frozen);
        let out_b = simulate(&params, &VolterraRule, &coeffs, &b, BiasUpdate::Frozen);
        assert_eq!(out_a.param_trajectory, out_b.param_trajectory);
    }

    #[test]
    fn test_squeezed_logits_shape() {
        let params = init_params(RngKey::new(2), &[2, 1], 0.1);
        let data = fixed_experiment(&[1.0, 0.0]);
        let out = simulate(
            &params,
            &VolterraRule,
            &Coefficients::volterra_zeros(),
            &data,
            BiasUpdate::Frozen,
        );
        assert_eq!(out.squeezed_logits().dim(), (2, 2));
    }

    #[test]
    fn test_input_dim_mismatch_panics() {
        let params = init_params(RngKey::new(2), &[3, 1], 0.1);
        let data = fixed_experiment(&[1.0]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            simulate(
                &params,
                &VolterraRule,
                &Coefficients::reward_covariance(),
                &data,
                BiasUpdate::Frozen,
            )
        }));
        assert!(result.is_err());
    }
}
