// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # synaplast Network
//!
//! Layered network state, the sigmoid forward pass, and the weight-update
//! engine that applies a plasticity rule across every synapse of a weight
//! matrix.
//!
//! The engine makes tensor broadcasting explicit: one shared reward term
//! and one shared coefficient tensor are broadcast (not mapped) across a
//! doubly-nested sweep over input and output units, and the resulting
//! delta matrix must match the weight matrix shape exactly.

pub mod forward;
pub mod key;
pub mod params;
pub mod update;

pub use forward::{forward, sigmoid, truncated_sigmoid};
pub use key::RngKey;
pub use params::{init_params, Layer, Params};
pub use update::{update_params, weight_delta};
