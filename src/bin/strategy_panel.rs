// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strategy control panel server
//!
//! Local web panel for creating, importing and inspecting strategy YAML
//! files and reading the bot log.

use lingo_stats::{
    config::Config, logging::init_logging, routes::create_panel_router, services::StrategyStore,
    PanelState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.panel_port, "Starting strategy panel");

    let store = StrategyStore::new(&config.strategy_dir);
    store.ensure_dir().await?;
    tracing::info!(
        dir = %store.dir().display(),
        webui = %config.webui_dir.display(),
        log_file = %config.log_file.display(),
        "Strategy store ready"
    );

    let state = Arc::new(PanelState {
        config: config.clone(),
        store,
    });

    let app = create_panel_router(state);

    let addr = format!("0.0.0.0:{}", config.panel_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Panel listening");

    axum::serve(listener, app).await?;
    Ok(())
}
