// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validated upstream username.

use crate::error::AppError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Usernames accepted before any upstream call is made.
pub static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("username pattern is valid"));

/// Check a raw string against the username pattern.
pub fn is_valid_username(raw: &str) -> bool {
    USERNAME_PATTERN.is_match(raw)
}

/// A username that passed [`is_valid_username`].
///
/// The only way to build one is [`Username::parse`], so holding a
/// `Username` means the value is safe to put in an upstream URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if is_valid_username(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::InvalidIdentifier)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
