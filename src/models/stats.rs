// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalized learning statistics served by `/stats`.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// League label used when the language record has none.
pub const UNKNOWN_LEAGUE: &str = "unknown";

/// Flat projection of one upstream profile.
///
/// Built fresh for every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResult {
    pub username: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub daily_streak: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_xp: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub crowns: u64,
    pub has_plus: bool,
    /// Display name of the active language (e.g. "French")
    pub learning_language_string: String,
    /// Language code the record was taken from (e.g. "fr")
    pub learning_language: String,
    /// Account creation field, passed through as the upstream sends it
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub created: serde_json::Value,
    pub current_league: String,
    /// Reserved; upstream exposes no data for it yet.
    pub top3_completion: bool,
    /// When this response was generated (RFC3339, UTC)
    pub generated_at: String,
}

impl StatsResult {
    /// Compare everything except `generated_at`.
    pub fn same_stats(&self, other: &Self) -> bool {
        Self {
            generated_at: String::new(),
            ..self.clone()
        } == Self {
            generated_at: String::new(),
            ..other.clone()
        }
    }
}
