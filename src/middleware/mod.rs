// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules.

pub mod security;

pub use security::{add_panel_security_headers, add_security_headers};
