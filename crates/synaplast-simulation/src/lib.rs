// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # synaplast Simulation
//!
//! Trial-by-trial weight-update simulators and the evaluation harness.
//!
//! Two simulation modes share one weight-update engine:
//! - the in-silico scan ([`simulate`]): a strict left-to-right fold over
//!   pre-recorded, padded trials, carrying network parameters forward and
//!   recording the full weight/activation trajectory;
//! - the fly experiment ([`simulate_fly_experiment`]): sequential sampling
//!   with variable-length trials, a consumable per-odor reward pool, and a
//!   moving-average expected reward.
//!
//! All randomness is threaded through [`RngKey`] values; nothing draws
//! from ambient generator state.

pub mod data;
pub mod evaluate;
pub mod fly;
pub mod scan;
pub mod stimuli;

pub use data::{mask_logits, ExperimentData, TrialRecord};
pub use evaluate::{evaluate, CoefficientEval, EvalOutput};
pub use fly::{simulate_fly_experiment, simulate_fly_trial, FlyExperimentOutput, FlyState};
pub use scan::{simulate, SimulationOutput};
pub use stimuli::OdorStimuli;

pub use synaplast_network::RngKey;
