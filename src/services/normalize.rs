// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Projection of raw upstream profiles into [`StatsResult`].

use crate::error::AppError;
use crate::json_utils::{lookup, lookup_object, lookup_or};
use crate::models::stats::{StatsResult, UNKNOWN_LEAGUE};
use crate::models::Username;
use crate::services::upstream::RawProfile;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Failure turning a fetched profile into stats.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Upstream answered 200 but the `user` object is missing or empty.
    #[error("profile has no user data")]
    SubjectNotFound,
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::SubjectNotFound => AppError::SubjectNotFound,
        }
    }
}

/// Normalize a profile, stamping it with the current time.
pub fn normalize(username: &Username, profile: &RawProfile) -> Result<StatsResult, NormalizeError> {
    normalize_at(username, profile, Utc::now())
}

/// Normalize a profile with an explicit generation timestamp.
pub fn normalize_at(
    username: &Username,
    profile: &RawProfile,
    now: DateTime<Utc>,
) -> Result<StatsResult, NormalizeError> {
    let user = profile
        .get("user")
        .filter(|u| u.as_object().is_some_and(|m| !m.is_empty()))
        .ok_or(NormalizeError::SubjectNotFound)?;

    let language = active_language(user);
    let record = lookup(user, &["language_data", language.as_str()]).unwrap_or(&Value::Null);

    Ok(StatsResult {
        username: username.to_string(),
        daily_streak: lookup_or(record, &["streak"], 0),
        total_xp: lookup_or(record, &["xp"], 0),
        crowns: lookup_or(record, &["crowns"], 0),
        has_plus: lookup_or(user, &["has_plus"], false),
        learning_language_string: lookup_or(record, &["language_string"], String::new()),
        learning_language: language,
        created: lookup(user, &["created"])
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::from(0)),
        current_league: lookup_or(record, &["current_league"], UNKNOWN_LEAGUE.to_string()),
        top3_completion: false,
        generated_at: format_utc_rfc3339(now),
    })
}

/// Language code whose record should be reported.
///
/// The declared `learning_language` wins when it is a non-empty string;
/// otherwise the first entry of `language_data` in document order; otherwise
/// the empty string.
pub fn active_language(user: &Value) -> String {
    let declared: String = lookup_or(user, &["learning_language"], String::new());
    if !declared.is_empty() {
        return declared;
    }

    lookup_object(user, &["language_data"])
        .keys()
        .next()
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> RawProfile {
        match value {
            Value::Object(map) => map,
            _ => panic!("test profile must be an object"),
        }
    }

    fn ada() -> Username {
        Username::parse("ada_l").unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    #[test]
    fn test_declared_language_record() {
        let raw = profile(json!({
            "user": {
                "learning_language": "fr",
                "has_plus": true,
                "created": "2 years ago",
                "language_data": {
                    "fr": {
                        "streak": 5,
                        "xp": 100,
                        "crowns": 2,
                        "language_string": "French",
                        "current_league": "Gold"
                    }
                }
            }
        }));

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.username, "ada_l");
        assert_eq!(stats.daily_streak, 5);
        assert_eq!(stats.total_xp, 100);
        assert_eq!(stats.crowns, 2);
        assert!(stats.has_plus);
        assert_eq!(stats.learning_language_string, "French");
        assert_eq!(stats.learning_language, "fr");
        assert_eq!(stats.created, json!("2 years ago"));
        assert_eq!(stats.current_league, "Gold");
        assert!(!stats.top3_completion);
        assert_eq!(stats.generated_at, "2025-10-09T08:53:20Z");
    }

    #[test]
    fn test_falls_back_to_first_language() {
        let raw = profile(json!({
            "user": {
                "learning_language": "",
                "language_data": { "de": { "streak": 9 } }
            }
        }));

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.learning_language, "de");
        assert_eq!(stats.daily_streak, 9);
    }

    #[test]
    fn test_first_language_follows_document_order() {
        let raw: RawProfile = serde_json::from_str(
            r#"{"user": {"language_data": {"zu": {"xp": 1}, "ab": {"xp": 2}, "mm": {"xp": 3}}}}"#,
        )
        .unwrap();

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.learning_language, "zu");
        assert_eq!(stats.total_xp, 1);
    }

    #[test]
    fn test_non_string_learning_language_falls_back() {
        let user = json!({"learning_language": 42, "language_data": {"es": {}}});
        assert_eq!(active_language(&user), "es");
    }

    #[test]
    fn test_empty_language_data_defaults_everything() {
        let raw = profile(json!({"user": {"has_plus": false, "language_data": {}}}));

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.learning_language, "");
        assert_eq!(stats.daily_streak, 0);
        assert_eq!(stats.total_xp, 0);
        assert_eq!(stats.crowns, 0);
        assert_eq!(stats.learning_language_string, "");
        assert_eq!(stats.created, json!(0));
        assert_eq!(stats.current_league, UNKNOWN_LEAGUE);
    }

    #[test]
    fn test_declared_language_without_record() {
        let raw = profile(json!({
            "user": {
                "learning_language": "ja",
                "language_data": { "fr": { "streak": 5 } }
            }
        }));

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.learning_language, "ja");
        assert_eq!(stats.daily_streak, 0);
    }

    #[test]
    fn test_mistyped_fields_use_defaults() {
        let raw = profile(json!({
            "user": {
                "has_plus": "yes",
                "created": null,
                "language_data": {
                    "it": {
                        "streak": "five",
                        "xp": -3,
                        "crowns": [1],
                        "language_string": 7,
                        "current_league": {"name": "Ruby"}
                    }
                }
            }
        }));

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.learning_language, "it");
        assert_eq!(stats.daily_streak, 0);
        assert_eq!(stats.total_xp, 0);
        assert_eq!(stats.crowns, 0);
        assert!(!stats.has_plus);
        assert_eq!(stats.learning_language_string, "");
        assert_eq!(stats.created, json!(0));
        assert_eq!(stats.current_league, UNKNOWN_LEAGUE);
    }

    #[test]
    fn test_language_data_not_an_object() {
        let raw = profile(json!({"user": {"id": 3, "language_data": ["fr"]}}));

        let stats = normalize_at(&ada(), &raw, fixed_now()).unwrap();
        assert_eq!(stats.learning_language, "");
        assert_eq!(stats.current_league, UNKNOWN_LEAGUE);
    }

    #[test]
    fn test_missing_or_empty_user_is_not_found() {
        for raw in [
            json!({}),
            json!({"user": {}}),
            json!({"user": null}),
            json!({"user": "ada"}),
            json!({"users": [{"id": 1}]}),
        ] {
            let err = normalize_at(&ada(), &profile(raw.clone()), fixed_now()).unwrap_err();
            assert!(
                matches!(err, NormalizeError::SubjectNotFound),
                "{raw} should be not found"
            );
        }
    }

    #[test]
    fn test_repeat_normalization_is_stable() {
        let raw = profile(json!({
            "user": {"learning_language": "fr", "language_data": {"fr": {"xp": 10}}}
        }));

        let first = normalize(&ada(), &raw).unwrap();
        let second = normalize(&ada(), &raw).unwrap();
        assert!(first.same_stats(&second));
    }
}
