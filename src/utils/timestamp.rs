//! Parsing of tweet `created_at` values.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Native archive format, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const TWITTER_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parses a `created_at` string into a timestamp.
///
/// Accepts the archive's native format, RFC 3339, RFC 2822 and a bare
/// `YYYY-MM-DD HH:MM:SS` (read as UTC). Returns `None` for anything else.
pub fn parse_created_at(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    DateTime::parse_from_str(value, TWITTER_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
}
