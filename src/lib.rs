// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lingo-Stats: learning statistics proxy and strategy control panel
//!
//! This crate provides two small HTTP services: a proxy that fetches a
//! public learner profile, normalizes it and re-serves a fixed set of
//! fields, and a local panel for managing YAML strategy files.

pub mod config;
pub mod error;
pub mod json_utils;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{StrategyStore, UpstreamClient};

/// Shared state of the stats service.
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
}

/// Shared state of the strategy control panel.
pub struct PanelState {
    pub config: Config,
    pub store: StrategyStore,
}
