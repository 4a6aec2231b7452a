// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Reward-pool and block-schedule behavior of the fly experiment.

use ndarray::Array2;
use synaplast::config::ExperimentConfig;
use synaplast::prelude::*;

fn fly_cfg(reward_ratios: Vec<f64>, trials_per_block: usize) -> ExperimentConfig {
    ExperimentConfig {
        layer_sizes: vec![2, 1],
        trials_per_block,
        num_blocks: reward_ratios.len(),
        num_exps: 1,
        reward_ratios,
        num_odors: 2,
        moving_avg_window: 10,
        init_scale: 0.1,
    }
}

fn run_experiment(seed: u64, cfg: &ExperimentConfig) -> FlyExperimentOutput {
    let stimuli = OdorStimuli::symmetric(cfg.num_odors, cfg.input_dim(), 1.0);
    simulate_fly_experiment(
        RngKey::new(seed),
        Array2::zeros((cfg.input_dim(), 1)),
        &VolterraRule,
        &Coefficients::reward_covariance(),
        &stimuli,
        cfg,
    )
}

#[test]
fn test_consumed_rewards_are_not_redrawn_without_replenishment() {
    // Block 1 replenishes every trial; block 2 never does. Whatever block 2
    // pays out can only be rewards left over from block 1 — at most one per
    // odor — because a consumed slot stays empty without a new Bernoulli
    // draw.
    let cfg = fly_cfg(vec![1.0, 0.0], 10);
    for seed in 0..20 {
        let out = run_experiment(seed, &cfg);
        let block2_total: f64 = out
            .data
            .rewards
            .iter()
            .skip(cfg.trials_per_block)
            .sum();
        assert!(
            block2_total <= cfg.num_odors as f64,
            "seed {}: block 2 paid {} rewards with an unreplenished pool",
            seed,
            block2_total
        );
    }
}

#[test]
fn test_full_ratio_pays_every_trial() {
    // ratio = 1.0 refills both slots before every trial, so every commit
    // finds a reward waiting.
    let cfg = fly_cfg(vec![1.0], 15);
    let out = run_experiment(3, &cfg);
    assert!(out.data.rewards.iter().all(|&r| r == 1.0));
}

#[test]
fn test_higher_ratio_block_collects_more_reward() {
    // trials_per_block = 20, reward_ratios = [0.2, 0.8]: aggregated over
    // many seeds, the empirical reward rate in block 2 must exceed block 1.
    let cfg = fly_cfg(vec![0.2, 0.8], 20);
    let mut block1_total = 0.0;
    let mut block2_total = 0.0;
    for seed in 0..20 {
        let out = run_experiment(seed, &cfg);
        for (t, &reward) in out.data.rewards.iter().enumerate() {
            if t < cfg.trials_per_block {
                block1_total += reward;
            } else {
                block2_total += reward;
            }
        }
    }
    assert!(
        block2_total > block1_total,
        "expected richer block 2 ({} vs {})",
        block2_total,
        block1_total
    );
}

#[test]
fn test_expected_reward_rises_in_rich_block() {
    // The moving average should catch up with the richer second block.
    let cfg = fly_cfg(vec![0.2, 0.8], 20);
    let mut early = 0.0;
    let mut late = 0.0;
    for seed in 100..120 {
        let out = run_experiment(seed, &cfg);
        let n = out.data.expected_rewards.len();
        early += out.data.expected_rewards[n / 4];
        late += out.data.expected_rewards[n - 1];
    }
    assert!(late > early, "expected reward never adapted ({} vs {})", late, early);
}

#[test]
fn test_trial_lengths_match_decision_padding() {
    let cfg = fly_cfg(vec![0.5, 0.5], 10);
    let out = run_experiment(77, &cfg);
    assert_eq!(
        ExperimentData::trial_lengths_from_decisions(&out.data.decisions),
        out.data.trial_lengths
    );
    assert!(out.data.trial_lengths.iter().all(|&length| length >= 1));
}

#[test]
fn test_generated_data_replays_cleanly_through_the_scan() {
    // End-to-end: generate with the covariance rule, then replay the same
    // data through the scan simulator and check the trajectory is complete
    // and aligned with the generated trials.
    let cfg = fly_cfg(vec![0.2, 0.8], 10);
    let stimuli = OdorStimuli::symmetric(cfg.num_odors, cfg.input_dim(), 1.0);
    let key = RngKey::new(12);
    let (init_key, gen_key) = key.split();
    let params = init_params(init_key, &cfg.layer_sizes, 0.01);

    let generated = simulate_fly_experiment(
        gen_key,
        params[0].weights.clone(),
        &VolterraRule,
        &Coefficients::reward_covariance(),
        &stimuli,
        &cfg,
    );

    let out = simulate(
        &params,
        &VolterraRule,
        &Coefficients::reward_covariance(),
        &generated.data,
        BiasUpdate::Frozen,
    );
    assert_eq!(out.param_trajectory.len(), cfg.total_trials());
    // The scan applies the same rule to the same trials from the same
    // starting weights, so it must land on the generator's final weights.
    assert_eq!(
        out.param_trajectory.last().unwrap()[0].weights,
        generated.final_weights
    );
}
