// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with a `Z` suffix, whole seconds.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_drops_subseconds() {
        let date = DateTime::from_timestamp(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2023-11-14T22:13:20Z");
    }
}
