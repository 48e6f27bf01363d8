// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lingo-Stats API Server
//!
//! Fetches public learner profiles from the upstream API and serves a
//! normalized subset of their statistics.

use lingo_stats::{config::Config, logging::init_logging, services::UpstreamClient, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Lingo-Stats API");

    let upstream = UpstreamClient::from_config(&config)?;
    tracing::info!(
        upstream = %config.upstream_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        max_attempts = config.upstream_max_attempts,
        "Upstream client initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        upstream,
    });

    let app = lingo_stats::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
