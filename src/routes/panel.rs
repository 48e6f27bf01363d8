// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strategy control panel routes.
//!
//! Start/stop only log and echo the request; there is no execution
//! engine behind them.

use crate::error::{AppError, Result};
use crate::services::log_tail::tail_lines;
use crate::PanelState;
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    middleware,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Body of `/logs` when the log file does not exist.
pub const LOG_NOT_FOUND: &str = "Log not found.";

/// Build the control panel router.
pub fn create_panel_router(state: Arc<PanelState>) -> Router {
    let webui = ServeDir::new(&state.config.webui_dir);

    Router::new()
        .route("/", get(index))
        .route("/add_strategy", post(add_strategy))
        .route("/import_strategy", post(import_strategy))
        .route("/strategies", get(list_strategies))
        .route(
            "/strategies/{file}",
            get(get_strategy).delete(delete_strategy),
        )
        .route("/start", post(start_strategy))
        .route("/stop", post(stop_strategy))
        .route("/status", get(bot_status))
        .route("/logs", get(get_logs))
        .nest_service("/webui", webui)
        .layer(middleware::from_fn(
            crate::middleware::security::add_panel_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// ─── Index ───────────────────────────────────────────────────

/// Serve the panel's landing page.
async fn index(State(state): State<Arc<PanelState>>) -> Result<Html<String>> {
    let path = state.config.webui_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound("Panel UI (index.html)".to_string()))
        }
        Err(e) => Err(AppError::Storage(e.to_string())),
    }
}

// ─── Strategy Files ──────────────────────────────────────────

#[derive(Deserialize)]
struct AddStrategyRequest {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Response for operations that touch a single strategy file.
#[derive(Serialize)]
pub struct FileResponse {
    pub status: &'static str,
    pub file: String,
}

#[derive(Serialize)]
pub struct StrategyListResponse {
    pub strategies: Vec<String>,
}

/// Create a strategy file with default market settings.
async fn add_strategy(
    State(state): State<Arc<PanelState>>,
    body: std::result::Result<Json<AddStrategyRequest>, JsonRejection>,
) -> Result<Json<FileResponse>> {
    let Json(req) = body?;
    let file = state.store.create(&req.name, &req.kind).await?;
    Ok(Json(FileResponse { status: "ok", file }))
}

/// Upload a strategy file (multipart field `file`).
async fn import_strategy(
    State(state): State<Arc<PanelState>>,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let file = state.store.import(&file_name, &contents).await?;
        return Ok(Json(FileResponse { status: "ok", file }));
    }

    Err(AppError::BadRequest("No file uploaded.".to_string()))
}

async fn list_strategies(
    State(state): State<Arc<PanelState>>,
) -> Result<Json<StrategyListResponse>> {
    let strategies = state.store.list().await?;
    Ok(Json(StrategyListResponse { strategies }))
}

/// Return a strategy file's YAML document as JSON.
async fn get_strategy(
    State(state): State<Arc<PanelState>>,
    Path(file): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let doc = state.store.read(&file).await?;
    let json = serde_json::to_value(&doc).map_err(|e| {
        AppError::BadRequest(format!("Strategy {file} cannot be shown as JSON: {e}"))
    })?;
    Ok(Json(json))
}

async fn delete_strategy(
    State(state): State<Arc<PanelState>>,
    Path(file): Path<String>,
) -> Result<Json<FileResponse>> {
    state.store.delete(&file).await?;
    Ok(Json(FileResponse {
        status: "deleted",
        file,
    }))
}

// ─── Bot Control ─────────────────────────────────────────────

#[derive(Deserialize)]
struct StrategyCommand {
    #[serde(default)]
    strategy: Option<String>,
}

#[derive(Serialize)]
pub struct CommandResponse {
    pub status: &'static str,
    pub strategy: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub active_strategies: Vec<String>,
}

async fn start_strategy(
    body: std::result::Result<Json<StrategyCommand>, JsonRejection>,
) -> Result<Json<CommandResponse>> {
    let Json(cmd) = body?;
    tracing::info!(strategy = ?cmd.strategy, "Starting strategy");
    Ok(Json(CommandResponse {
        status: "started",
        strategy: cmd.strategy,
    }))
}

async fn stop_strategy(
    body: std::result::Result<Json<StrategyCommand>, JsonRejection>,
) -> Result<Json<CommandResponse>> {
    let Json(cmd) = body?;
    tracing::info!(strategy = ?cmd.strategy, "Stopping strategy");
    Ok(Json(CommandResponse {
        status: "stopped",
        strategy: cmd.strategy,
    }))
}

async fn bot_status(State(state): State<Arc<PanelState>>) -> Result<Json<StatusResponse>> {
    let active_strategies = state.store.list().await?;
    Ok(Json(StatusResponse {
        running: true,
        active_strategies,
    }))
}

/// Tail of the bot log as HTML, one line per `<br>`.
async fn get_logs(State(state): State<Arc<PanelState>>) -> Result<Html<String>> {
    let lines = tail_lines(&state.config.log_file, state.config.log_tail_lines)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let Some(lines) = lines else {
        return Ok(Html(LOG_NOT_FOUND.to_string()));
    };

    let body = lines
        .iter()
        .map(|l| escape_html(l))
        .collect::<Vec<_>>()
        .join("<br>");
    Ok(Html(body))
}

fn escape_html(line: &str) -> String {
    line.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
