// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod stats;
pub mod strategy;
pub mod username;

pub use stats::StatsResult;
pub use strategy::StrategyConfig;
pub use username::{is_valid_username, Username};
