// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Both binaries read the same variables; each one only looks at the
//! fields it needs.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Stats service ---
    /// Stats server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Upstream profile API base URL (scheme + host, no trailing slash)
    pub upstream_base_url: String,
    /// Per-attempt upstream timeout
    pub upstream_timeout: Duration,
    /// Total upstream attempts, including the first one
    pub upstream_max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub upstream_backoff: Duration,
    /// Upper bound for a single backoff delay
    pub upstream_max_backoff: Duration,
    /// Username used when `/stats` is called without one
    pub default_username: Option<String>,

    // --- Control panel ---
    /// Control panel port
    pub panel_port: u16,
    /// Directory holding strategy YAML files
    pub strategy_dir: PathBuf,
    /// Directory holding the panel's static web UI
    pub webui_dir: PathBuf,
    /// Log file tailed by `/logs`
    pub log_file: PathBuf,
    /// Number of lines returned by `/logs`
    pub log_tail_lines: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local
    /// development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let upstream_max_attempts = parse_or("UPSTREAM_MAX_ATTEMPTS", 3u32);
        if upstream_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "UPSTREAM_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }

        let upstream_base_url = env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| "https://www.duolingo.com".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            port: parse_or("PORT", 8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            upstream_base_url,
            upstream_timeout: Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECS", 10)),
            upstream_max_attempts,
            upstream_backoff: Duration::from_millis(parse_or("UPSTREAM_BACKOFF_MS", 500)),
            upstream_max_backoff: Duration::from_millis(parse_or(
                "UPSTREAM_MAX_BACKOFF_MS",
                8000,
            )),
            default_username: env::var("DEFAULT_USERNAME")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),

            panel_port: parse_or("PANEL_PORT", 5050),
            strategy_dir: env::var("STRATEGY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./strategies")),
            webui_dir: env::var("WEBUI_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./webui")),
            log_file: env::var("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./logs/hummingbot.log")),
            log_tail_lines: parse_or("LOG_TAIL_LINES", 100),
        })
    }

    /// Config for tests: fast retries, no default username.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            upstream_base_url: "http://127.0.0.1:9".to_string(),
            upstream_timeout: Duration::from_secs(2),
            upstream_max_attempts: 3,
            upstream_backoff: Duration::from_millis(1),
            upstream_max_backoff: Duration::from_millis(5),
            default_username: None,
            panel_port: 5050,
            strategy_dir: PathBuf::from("./strategies"),
            webui_dir: PathBuf::from("./webui"),
            log_file: PathBuf::from("./logs/hummingbot.log"),
            log_tail_lines: 100,
        }
    }
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or unparseable.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("UPSTREAM_BASE_URL", "http://upstream.test/");
        env::set_var("UPSTREAM_TIMEOUT_SECS", "4");
        env::set_var("LOG_TAIL_LINES", "not-a-number");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.upstream_base_url, "http://upstream.test");
        assert_eq!(config.upstream_timeout, Duration::from_secs(4));
        assert_eq!(config.log_tail_lines, 100);

        env::remove_var("UPSTREAM_BASE_URL");
        env::remove_var("UPSTREAM_TIMEOUT_SECS");
        env::remove_var("LOG_TAIL_LINES");
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or("LINGO_STATS_SURELY_UNSET_VAR", 42u16), 42);
    }
}
