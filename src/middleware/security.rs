// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.
//!
//! The stats API only ever returns JSON, so it gets a CSP that forbids
//! everything. The panel serves its own HTML, scripts and styles and
//! needs `'self'` allowed.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";
const PANEL_CSP: &str = "default-src 'self'; img-src 'self' data:; frame-ancestors 'none'";

fn apply_common_headers(headers: &mut HeaderMap, csp: &'static str) {
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Content-Security-Policy", HeaderValue::from_static(csp));
    headers.insert("Referrer-Policy", HeaderValue::from_static("no-referrer"));
}

/// Add security headers to all stats API responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    apply_common_headers(headers, API_CSP);
    headers.insert(
        "Strict-Transport-Security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    response
}

/// Add security headers to control panel responses.
///
/// No HSTS: the panel is served over plain HTTP on localhost.
pub async fn add_panel_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    apply_common_headers(response.headers_mut(), PANEL_CSP);
    response
}
