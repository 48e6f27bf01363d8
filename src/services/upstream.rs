// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the upstream public profile API.
//!
//! Handles:
//! - Request URL construction from a validated username
//! - Per-attempt timeout
//! - Retries with backoff for rate limits, 5xx and transport failures
//! - Classification of every failure into [`FetchError`]

use crate::config::Config;
use crate::error::AppError;
use crate::models::Username;
use crate::services::retry::RetryPolicy;
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Path of the public user lookup endpoint.
const PROFILE_PATH: &str = "/2017-06-30/users";

/// Upstream statuses worth retrying.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Decoded upstream profile document, in the order the upstream sent it.
pub type RawProfile = Map<String, Value>;

/// Failure fetching a profile.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream returned 404")]
    NotFound,

    #[error("upstream returned 429")]
    RateLimited,

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream connection failed: {0}")]
    Unreachable(String),

    #[error("upstream body is not a JSON object: {0}")]
    Malformed(String),

    /// Local client failure (request building, redirects, decoding).
    #[error("upstream request failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// Whether another attempt might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::RateLimited | FetchError::Timeout | FetchError::Unreachable(_) => true,
            FetchError::Status(code) => RETRYABLE_STATUSES.contains(code),
            FetchError::NotFound | FetchError::Malformed(_) | FetchError::Transport(_) => false,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_builder() || err.is_redirect() || err.is_decode() {
            FetchError::Transport(err.to_string())
        } else {
            // Refused connects, resets and connections closed mid-response.
            FetchError::Unreachable(err.to_string())
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound => AppError::UpstreamNotFound,
            FetchError::RateLimited => AppError::UpstreamRateLimited,
            FetchError::Status(code) => AppError::UpstreamError(code),
            FetchError::Timeout => AppError::UpstreamTimeout,
            FetchError::Unreachable(msg) => {
                tracing::warn!(error = %msg, "Upstream unreachable");
                AppError::UpstreamUnreachable
            }
            FetchError::Malformed(msg) => AppError::MalformedUpstreamBody(msg),
            FetchError::Transport(msg) => {
                AppError::Internal(anyhow::anyhow!("upstream transport failure: {msg}"))
            }
        }
    }
}

/// Upstream profile API client.
///
/// Built once per process; the inner `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl UpstreamClient {
    /// Create a client with an explicit timeout and retry policy.
    pub fn new(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
        retry: RetryPolicy,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lingo-stats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// Create a client from application config.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let retry = RetryPolicy::new(config.upstream_max_attempts, config.upstream_backoff)
            .with_max_delay(config.upstream_max_backoff);
        Self::new(&config.upstream_base_url, config.upstream_timeout, retry)
    }

    /// Full profile endpoint URL (without the query string).
    pub fn profile_url(&self) -> String {
        format!("{}{}", self.base_url, PROFILE_PATH)
    }

    /// Fetch a user's profile, retrying transient failures.
    pub async fn fetch_profile(&self, username: &Username) -> Result<RawProfile, FetchError> {
        let url = self.profile_url();
        self.retry
            .run(
                "fetch_profile",
                |attempt| {
                    tracing::debug!(username = %username, attempt = attempt + 1, "Fetching profile");
                    self.fetch_once(&url, username)
                },
                FetchError::is_transient,
            )
            .await
    }

    /// One attempt, no retries.
    async fn fetch_once(&self, url: &str, username: &Username) -> Result<RawProfile, FetchError> {
        let response = self
            .http
            .get(url)
            .query(&[("username", username.as_str())])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!(username = %username, "Upstream rate limit hit (429)");
                return Err(FetchError::RateLimited);
            }
            other => return Err(FetchError::Status(other.as_u16())),
        }

        let body = response.bytes().await.map_err(FetchError::from_reqwest)?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(FetchError::Malformed(format!(
                "expected object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(FetchError::Malformed(e.to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
