// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Defaults-safe lookups into untyped JSON trees.
//!
//! Upstream payloads are only loosely specified, so every field is read
//! through these helpers: a missing key, a non-object intermediate, or a
//! wrong-typed leaf yields the caller's default instead of an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Walk `keys` from `root`, returning the value at the end of the path.
///
/// Returns `None` as soon as the current value is not an object or does
/// not contain the next key. An empty path returns `root` itself.
pub fn lookup<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(root, |current, key| current.as_object()?.get(*key))
}

/// Typed lookup with a fallback.
///
/// `null` leaves and leaves that do not deserialize as `T` both produce
/// `default`.
pub fn lookup_or<T: DeserializeOwned>(root: &Value, keys: &[&str], default: T) -> T {
    lookup(root, keys)
        .filter(|v| !v.is_null())
        .and_then(|v| T::deserialize(v).ok())
        .unwrap_or(default)
}

/// Lookup that only accepts a JSON object, falling back to an empty one.
pub fn lookup_object<'a>(root: &'a Value, keys: &[&str]) -> &'a serde_json::Map<String, Value> {
    static EMPTY: std::sync::OnceLock<serde_json::Map<String, Value>> = std::sync::OnceLock::new();

    lookup(root, keys)
        .and_then(Value::as_object)
        .unwrap_or_else(|| EMPTY.get_or_init(serde_json::Map::new))
}
