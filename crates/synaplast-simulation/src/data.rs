// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Padded experiment data
//!
//! Trials have variable length, so per-trial tensors are padded to the
//! longest trial with NaN as an explicit "no data" sentinel. NaN padding
//! is not an error: consumers are length-aware and mask it out, which
//! keeps it distinguishable from a genuine zero.

use ndarray::{s, Array1, Array2, Array3};

/// One variable-length trial as produced by the fly simulator.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    /// One input vector per sampled timestep
    pub inputs: Vec<Array1<f64>>,
    /// Odor identity per timestep
    pub odors: Vec<usize>,
    /// Sampled binary decision per timestep; the last one is always 1.0
    pub decisions: Vec<f64>,
    /// Reward collected at the commit timestep
    pub reward: f64,
    /// Moving-average expected reward at trial start
    pub expected_reward: f64,
}

impl TrialRecord {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// A full experiment's trials, padded and stacked for the scan simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentData {
    /// `[num_trials, max_len, input_dim]`, NaN beyond each trial's length
    pub xs: Array3<f64>,
    /// `[num_trials, max_len]`, NaN beyond each trial's length
    pub decisions: Array2<f64>,
    /// `[num_trials]`
    pub rewards: Array1<f64>,
    /// `[num_trials]`
    pub expected_rewards: Array1<f64>,
    /// True (unpadded) length of every trial
    pub trial_lengths: Vec<usize>,
}

impl ExperimentData {
    /// Stack variable-length trials into NaN-padded tensors.
    ///
    /// # Panics
    ///
    /// If `trials` is empty, any trial is empty, or input widths disagree.
    pub fn from_trials(trials: &[TrialRecord]) -> Self {
        assert!(!trials.is_empty(), "an experiment needs at least one trial");
        assert!(
            trials.iter().all(|t| !t.is_empty()),
            "every trial must contain at least one timestep"
        );

        let num_trials = trials.len();
        let input_dim = trials[0].inputs[0].len();
        let max_len = trials.iter().map(|t| t.len()).max().unwrap();

        let mut xs = Array3::from_elem((num_trials, max_len, input_dim), f64::NAN);
        let mut decisions = Array2::from_elem((num_trials, max_len), f64::NAN);
        let mut rewards = Array1::zeros(num_trials);
        let mut expected_rewards = Array1::zeros(num_trials);
        let mut trial_lengths = Vec::with_capacity(num_trials);

        for (t, trial) in trials.iter().enumerate() {
            for (step, x) in trial.inputs.iter().enumerate() {
                assert_eq!(x.len(), input_dim, "input widths must agree across trials");
                xs.slice_mut(s![t, step, ..]).assign(x);
                decisions[[t, step]] = trial.decisions[step];
            }
            rewards[t] = trial.reward;
            expected_rewards[t] = trial.expected_reward;
            trial_lengths.push(trial.len());
        }

        Self {
            xs,
            decisions,
            rewards,
            expected_rewards,
            trial_lengths,
        }
    }

    pub fn num_trials(&self) -> usize {
        self.xs.dim().0
    }

    pub fn max_len(&self) -> usize {
        self.xs.dim().1
    }

    pub fn input_dim(&self) -> usize {
        self.xs.dim().2
    }

    /// Recover per-trial lengths from the NaN padding in a decisions
    /// tensor: the length is the count of non-NaN entries in the row.
    pub fn trial_lengths_from_decisions(decisions: &Array2<f64>) -> Vec<usize> {
        decisions
            .rows()
            .into_iter()
            .map(|row| row.iter().filter(|d| !d.is_nan()).count())
            .collect()
    }

    /// 0/1 mask over `[num_trials, max_len]`: 1.0 below each trial's
    /// length, 0.0 at and beyond it.
    pub fn logits_mask(&self) -> Array2<f64> {
        let mut mask = Array2::ones((self.num_trials(), self.max_len()));
        for (t, &length) in self.trial_lengths.iter().enumerate() {
            mask.slice_mut(s![t, length..]).fill(0.0);
        }
        mask
    }
}

/// Zero out logits at and beyond each trial's true length.
///
/// Padding positions carry no signal and must not contribute to any
/// downstream loss. Masking assigns 0.0 outright rather than multiplying
/// by a 0/1 mask, so NaN raw outputs at padded positions become exactly
/// zero too.
pub fn mask_logits(logits: &Array2<f64>, trial_lengths: &[usize]) -> Array2<f64> {
    assert_eq!(
        logits.nrows(),
        trial_lengths.len(),
        "one length per logits row"
    );
    let mut masked = logits.clone();
    for (t, &length) in trial_lengths.iter().enumerate() {
        assert!(length <= logits.ncols(), "trial length beyond padded width");
        masked.slice_mut(s![t, length..]).fill(0.0);
    }
    masked
}
