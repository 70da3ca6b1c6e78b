//! Decoding of the `data/tweets.js` payload into raw tweets.
//!
//! The payload is a JavaScript assignment such as
//! `window.YTD.tweets.part0 = [ { "tweet": { ... } }, ... ];`.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, warn};

use super::literal;
use crate::domain::entities::RawTweet;
use crate::error::AppError;

/// Removes the assignment header and trailing `;` around the literal.
///
/// Everything before the first `{` or `[` is dropped; if neither is present
/// the result is empty.
pub fn strip_assignment(text: &str) -> &str {
    let Some(start) = text.find(['{', '[']) else {
        return "";
    };
    let body = &text[start..];

    match body.trim_end().strip_suffix(';') {
        Some(without_terminator) => without_terminator,
        None => body,
    }
}

/// Decodes payload text into a JSON value.
///
/// Strict JSON is tried first, then the sandboxed literal parser.
///
/// # Errors
///
/// Returns [`AppError::PayloadDecode`] when both parsers reject the text.
pub fn decode_payload(text: &str) -> Result<Value, AppError> {
    let body = strip_assignment(text);

    let strict_err = match serde_json::from_str::<Value>(body) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    debug!("Strict JSON decode failed ({}), trying literal parser", strict_err);

    match literal::parse(body) {
        Ok(value) => {
            metrics::counter!("archive_lenient_decodes_total").increment(1);
            Ok(value)
        }
        Err(literal_err) => Err(AppError::payload_decode(format!(
            "not valid JSON ({strict_err}) nor a plain literal ({literal_err})"
        ))),
    }
}

/// Decodes payload text into usable tweets, most recent first.
///
/// Array elements are unwrapped from their `tweet` key when present. A
/// non-array payload yields no tweets. Unusable records are skipped.
///
/// # Errors
///
/// See [`decode_payload`].
pub fn decode_tweets(text: &str) -> Result<Vec<RawTweet>, AppError> {
    let items = match decode_payload(text)? {
        Value::Array(items) => items,
        other => {
            warn!(
                "Tweet payload is not an array (found {}), no tweets loaded",
                value_kind(&other)
            );
            return Ok(Vec::new());
        }
    };

    let total = items.len();
    let mut tweets: Vec<RawTweet> = items
        .into_iter()
        .map(unwrap_tweet)
        .filter_map(RawTweet::from_value)
        .collect();

    let skipped = total - tweets.len();
    if skipped > 0 {
        warn!("Skipped {} archive records without id or text", skipped);
    }

    sort_most_recent_first(&mut tweets);
    Ok(tweets)
}

fn unwrap_tweet(item: Value) -> Value {
    match item {
        Value::Object(mut wrapper) if wrapper.get("tweet").is_some_and(Value::is_object) => {
            wrapper.remove("tweet").unwrap_or_default()
        }
        other => other,
    }
}

/// Stable sort by `created_at` descending; unparsable dates go last.
pub fn sort_most_recent_first(tweets: &mut [RawTweet]) {
    tweets.sort_by(|a, b| match (a.published_at(), b.published_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tweets: &[RawTweet]) -> Vec<String> {
        tweets.iter().filter_map(RawTweet::id).collect()
    }

    #[test]
    fn test_strip_assignment_header_and_semicolon() {
        assert_eq!(
            strip_assignment("window.YTD.tweets.part0 = [1, 2];\n"),
            "[1, 2]"
        );
    }

    #[test]
    fn test_strip_assignment_without_header() {
        assert_eq!(strip_assignment("[1]"), "[1]");
        assert_eq!(strip_assignment("{\"a\": 1}  "), "{\"a\": 1}  ");
    }

    #[test]
    fn test_strip_assignment_only_one_terminator() {
        assert_eq!(strip_assignment("x = [1];;"), "[1];");
    }

    #[test]
    fn test_strip_assignment_no_brackets() {
        assert_eq!(strip_assignment("nothing here"), "");
    }

    #[test]
    fn test_decode_payload_strict_json() {
        let value = decode_payload("window.YTD.tweets.part0 = [{\"a\": 1}]").unwrap();
        assert_eq!(value, serde_json::json!([{ "a": 1 }]));
    }

    #[test]
    fn test_decode_payload_lenient_fallback() {
        let value = decode_payload("window.YTD.tweets.part0 = [{ a: 'x', },];").unwrap();
        assert_eq!(value, serde_json::json!([{ "a": "x" }]));
    }

    #[test]
    fn test_decode_payload_rejects_code() {
        let result = decode_payload("window.x = [fetch('http://evil')];");
        assert!(matches!(result, Err(AppError::PayloadDecode(_))));
    }

    #[test]
    fn test_decode_payload_empty_is_error() {
        assert!(matches!(
            decode_payload("no literal at all"),
            Err(AppError::PayloadDecode(_))
        ));
    }

    #[test]
    fn test_decode_tweets_unwraps_and_passes_through() {
        let text = r#"window.YTD.tweets.part0 = [
            { "tweet": { "id": "1", "full_text": "wrapped", "created_at": "2020-01-01T00:00:00Z" } },
            { "id": "2", "full_text": "bare", "created_at": "2021-01-01T00:00:00Z" }
        ]"#;

        let tweets = decode_tweets(text).unwrap();

        assert_eq!(ids(&tweets), vec!["2", "1"]);
        assert_eq!(tweets[1].raw_text(), "wrapped");
    }

    #[test]
    fn test_decode_tweets_non_array_is_empty() {
        let tweets = decode_tweets(r#"x = { "tweet": { "id": "1", "full_text": "a" } }"#).unwrap();
        assert!(tweets.is_empty());
    }

    #[test]
    fn test_decode_tweets_skips_unusable_records() {
        let text = r#"[
            { "tweet": { "full_text": "no id" } },
            { "tweet": { "id": "2" } },
            42,
            { "tweet": { "id": "3", "full_text": "ok" } }
        ]"#;

        let tweets = decode_tweets(text).unwrap();
        assert_eq!(ids(&tweets), vec!["3"]);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let text = r#"[
            { "id": "a", "full_text": "x", "created_at": "2020-01-01T00:00:00Z" },
            { "id": "b", "full_text": "x", "created_at": "not a date" },
            { "id": "c", "full_text": "x", "created_at": "2022-01-01T00:00:00Z" },
            { "id": "d", "full_text": "x", "created_at": "2020-01-01T00:00:00Z" },
            { "id": "e", "full_text": "x" },
            { "id": "f", "full_text": "x", "created_at": "Sat Jan 01 00:00:00 +0000 2022" }
        ]"#;

        let tweets = decode_tweets(text).unwrap();

        assert_eq!(ids(&tweets), vec!["c", "f", "a", "d", "b", "e"]);
    }
}
