// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use lingo_stats::error::AppError;
use lingo_stats::services::{FetchError, NormalizeError, StoreError};

#[test]
fn test_fetch_errors_map_to_statuses() {
    let cases = [
        (FetchError::NotFound, StatusCode::NOT_FOUND),
        (FetchError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
        (FetchError::Status(500), StatusCode::BAD_GATEWAY),
        (FetchError::Status(418), StatusCode::BAD_GATEWAY),
        (FetchError::Timeout, StatusCode::GATEWAY_TIMEOUT),
        (
            FetchError::Unreachable("connection refused".to_string()),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (
            FetchError::Malformed("expected object".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (
            FetchError::Transport("builder error".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (fetch_err, status) in cases {
        let label = fetch_err.to_string();
        let app_err: AppError = fetch_err.into();
        assert_eq!(app_err.status_and_code().0, status, "{label}");
    }
}

#[test]
fn test_subject_not_found_maps_to_404() {
    let err: AppError = NormalizeError::SubjectNotFound.into();
    assert!(matches!(err, AppError::SubjectNotFound));
    assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
}

#[test]
fn test_store_errors_map_to_statuses() {
    let err: AppError = StoreError::NotYaml.into();
    assert_eq!(err.status_and_code().0, StatusCode::BAD_REQUEST);

    let err: AppError = StoreError::NotFound("x.yml".to_string()).into();
    assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: AppError = StoreError::Io(io).into();
    assert_eq!(err.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
}
