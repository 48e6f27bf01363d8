// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Learning statistics routes.

use crate::error::{AppError, Result};
use crate::models::username::USERNAME_PATTERN;
use crate::models::{StatsResult, Username};
use crate::services::{normalize, UpstreamClient};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Stats routes. `/api/stats` is the path the bundled web frontend uses.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/api/stats", get(get_stats))
}

#[derive(Debug, Deserialize, Validate)]
struct StatsQuery {
    #[validate(regex(path = *USERNAME_PATTERN))]
    username: Option<String>,
}

/// Get normalized stats for a username.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<StatsResult>> {
    let Query(params) = query?;
    if let Err(errors) = params.validate() {
        tracing::debug!(username = ?params.username, %errors, "Rejected invalid username");
        return Err(AppError::InvalidIdentifier);
    }

    let raw = params
        .username
        .or_else(|| state.config.default_username.clone())
        .ok_or_else(|| AppError::BadRequest("Missing 'username' query parameter".to_string()))?;
    let username = Username::parse(&raw)?;

    let stats = fetch_stats(&state.upstream, &username).await?;
    Ok(Json(stats))
}

/// Fetch and normalize one user's stats.
pub async fn fetch_stats(upstream: &UpstreamClient, username: &Username) -> Result<StatsResult> {
    let profile = upstream.fetch_profile(username).await?;
    let stats = normalize(username, &profile)?;

    tracing::info!(
        username = %username,
        language = %stats.learning_language,
        streak = stats.daily_streak,
        "Stats served"
    );
    Ok(stats)
}
