// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::Response;
use lingo_stats::config::Config;
use lingo_stats::routes::{create_panel_router, create_router};
use lingo_stats::services::{StrategyStore, UpstreamClient};
use lingo_stats::{AppState, PanelState};
use std::path::Path;
use std::sync::Arc;

/// Create the stats app pointed at a (mock) upstream.
#[allow(dead_code)]
pub fn create_stats_app(upstream_uri: &str) -> axum::Router {
    create_stats_app_with(upstream_uri, |_| {})
}

/// Like [`create_stats_app`], with a hook to adjust the config first.
#[allow(dead_code)]
pub fn create_stats_app_with(upstream_uri: &str, adjust: impl FnOnce(&mut Config)) -> axum::Router {
    let mut config = Config::test_default();
    config.upstream_base_url = upstream_uri.to_string();
    adjust(&mut config);
    let upstream = UpstreamClient::from_config(&config).expect("Failed to build upstream client");

    create_router(Arc::new(AppState { config, upstream }))
}

/// Create the panel app with all its files under `root`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_panel_app(root: &Path) -> (axum::Router, Arc<PanelState>) {
    let mut config = Config::test_default();
    config.strategy_dir = root.join("strategies");
    config.webui_dir = root.join("webui");
    config.log_file = root.join("logs").join("bot.log");
    config.log_tail_lines = 3;

    let store = StrategyStore::new(&config.strategy_dir);
    let state = Arc::new(PanelState { config, store });

    (create_panel_router(state.clone()), state)
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
