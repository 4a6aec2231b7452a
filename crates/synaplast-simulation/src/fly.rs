// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fly sequential-sampling experiment
//!
//! Instead of pre-recorded fixed-length trials, each trial keeps sampling
//! odor stimuli until the network commits to one (decision = 1). On
//! commit the fly collects that odor's reward from a consumable pool, the
//! outcome enters a fixed-window reward history (the expected-reward
//! moving average), and one weight update is applied with the committed
//! stimulus. Blocks replenish the pool with one shared Bernoulli draw per
//! trial at a block-specific ratio; unconsumed rewards persist across
//! trials and blocks until collected.

use crate::data::{ExperimentData, TrialRecord};
use crate::stimuli::OdorStimuli;
use ndarray::{Array1, Array2};
use rand::Rng;
use std::collections::VecDeque;
use synaplast_config::ExperimentConfig;
use synaplast_network::{sigmoid, weight_delta, RngKey};
use synaplast_rules::{Coefficients, PlasticityRule};
use tracing::{debug, info};

/// Mutable state threaded through a fly experiment. Owned by the
/// simulation call, never module-level.
#[derive(Debug, Clone)]
pub struct FlyState {
    /// First-layer weights, `[input_dim x 1]`
    pub weights: Array2<f64>,
    /// Consumable reward pool, one slot per odor (0.0 or 1.0)
    rewards_in_arena: Array1<f64>,
    /// Recent reward outcomes, newest first, bounded by the window
    reward_history: VecDeque<f64>,
    window: usize,
}

impl FlyState {
    /// # Panics
    ///
    /// If the weight matrix has more than one output column or the window
    /// is zero.
    pub fn new(weights: Array2<f64>, num_odors: usize, window: usize) -> Self {
        assert_eq!(
            weights.ncols(),
            1,
            "fly experiments drive a single decision unit"
        );
        assert!(window > 0, "moving-average window must be nonzero");
        Self {
            weights,
            rewards_in_arena: Array1::zeros(num_odors),
            // History starts saturated with zeros so the average is
            // well-defined from trial one.
            reward_history: VecDeque::from(vec![0.0; window]),
            window,
        }
    }

    /// Expected reward: moving average over the history window.
    pub fn expected_reward(&self) -> f64 {
        self.reward_history.iter().sum::<f64>() / self.reward_history.len() as f64
    }

    pub fn rewards_in_arena(&self) -> &Array1<f64> {
        &self.rewards_in_arena
    }

    /// Bernoulli-replenish the pool at `ratio`, OR'd into whatever is
    /// still unconsumed. One shared draw refills every slot, so odors
    /// replenish together or not at all.
    fn replenish(&mut self, key: RngKey, ratio: f64) {
        let mut rng = key.rng();
        if rng.gen_bool(ratio) {
            self.rewards_in_arena.fill(1.0);
        }
    }

    fn consume(&mut self, odor: usize) -> f64 {
        let reward = self.rewards_in_arena[odor];
        self.rewards_in_arena[odor] = 0.0;
        reward
    }

    fn record_outcome(&mut self, reward: f64) {
        self.reward_history.push_front(reward);
        self.reward_history.truncate(self.window);
    }
}

/// Run one fly trial: sample stimuli until a commit decision, then collect
/// the reward and apply the weight update once.
///
/// Trial length is random and unbounded in principle; each stochastic
/// draw consumes a fresh split of `key`.
pub fn simulate_fly_trial(
    key: RngKey,
    state: &mut FlyState,
    rule: &dyn PlasticityRule,
    coeffs: &Coefficients,
    stimuli: &OdorStimuli,
) -> TrialRecord {
    let expected_reward = state.expected_reward();
    let num_odors = stimuli.num_odors();

    let mut inputs = Vec::new();
    let mut odors = Vec::new();
    let mut decisions = Vec::new();
    let mut key = key;

    loop {
        let (odor_key, carried) = key.split();
        key = carried;
        let odor = odor_key.rng().gen_range(0..num_odors);

        let (sample_key, carried) = key.split();
        key = carried;
        let x = stimuli.sample(sample_key, odor);

        let drive = x.dot(&state.weights)[0];
        let commit_prob = sigmoid(drive);

        let (decision_key, carried) = key.split();
        key = carried;
        let committed = decision_key.rng().gen_bool(commit_prob);

        inputs.push(x.clone());
        odors.push(odor);
        decisions.push(if committed { 1.0 } else { 0.0 });

        if committed {
            let reward = state.consume(odor);
            state.record_outcome(reward);

            let dw = weight_delta(&x, &state.weights, rule, coeffs, reward, expected_reward);
            state.weights = &state.weights + &dw;

            return TrialRecord {
                inputs,
                odors,
                decisions,
                reward,
                expected_reward,
            };
        }
    }
}

/// A complete fly experiment plus its final weights.
#[derive(Debug, Clone)]
pub struct FlyExperimentOutput {
    /// Padded, stacked trial data (NaN sentinel beyond each length)
    pub data: ExperimentData,
    /// Raw variable-length trials in block-major order
    pub trials: Vec<TrialRecord>,
    /// First-layer weights after the last trial
    pub final_weights: Array2<f64>,
}

/// Simulate `num_blocks x trials_per_block` fly trials under the given
/// coefficients, replenishing the reward pool before every trial at the
/// block's ratio.
pub fn simulate_fly_experiment(
    key: RngKey,
    initial_weights: Array2<f64>,
    rule: &dyn PlasticityRule,
    coeffs: &Coefficients,
    stimuli: &OdorStimuli,
    cfg: &ExperimentConfig,
) -> FlyExperimentOutput {
    assert_eq!(
        cfg.reward_ratios.len(),
        cfg.num_blocks,
        "one reward ratio per block"
    );
    assert_eq!(
        stimuli.num_odors(),
        cfg.num_odors,
        "stimuli must cover every configured odor"
    );
    assert_eq!(
        initial_weights.nrows(),
        stimuli.input_dim(),
        "weights must match stimulus dimensionality"
    );

    let mut state = FlyState::new(initial_weights, cfg.num_odors, cfg.moving_avg_window);
    let mut trials = Vec::with_capacity(cfg.total_trials());
    let mut key = key;

    for (block, &ratio) in cfg.reward_ratios.iter().enumerate() {
        debug!(block, ratio, "starting block");
        for _ in 0..cfg.trials_per_block {
            let (replenish_key, carried) = key.split();
            key = carried;
            state.replenish(replenish_key, ratio);

            let (trial_key, carried) = key.split();
            key = carried;
            trials.push(simulate_fly_trial(trial_key, &mut state, rule, coeffs, stimuli));
        }
    }

    info!(
        num_trials = trials.len(),
        rule = rule.name(),
        "fly experiment complete"
    );

    FlyExperimentOutput {
        data: ExperimentData::from_trials(&trials),
        trials,
        final_weights: state.weights,
    }
}
