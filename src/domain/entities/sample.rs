//! Sample tool request.

use serde_json::Value;

/// Sample size used when the request carries none or an invalid one.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Request for a random sample of tweet texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    size: usize,
}

impl SampleRequest {
    /// Creates a request; zero falls back to `default_size`.
    pub fn new(size: usize, default_size: usize) -> Self {
        Self {
            size: if size == 0 { default_size } else { size },
        }
    }

    /// Builds a request from tool arguments (`{"sampleSize": "10"}`).
    ///
    /// `sampleSize` is read like a loose integer: leading whitespace and a
    /// sign are accepted, parsing stops at the first non-digit. Missing,
    /// non-numeric and non-positive values fall back to `default_size`.
    /// A JSON number is accepted too.
    pub fn from_arguments(arguments: Option<&Value>, default_size: usize) -> Self {
        let requested = arguments
            .and_then(|args| args.get("sampleSize"))
            .and_then(|value| match value {
                Value::String(s) => parse_leading_int(s),
                Value::Number(n) => n.as_i64().map(i128::from),
                _ => None,
            })
            .filter(|n| *n > 0)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX));

        Self::new(requested.unwrap_or(default_size), default_size)
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for SampleRequest {
    fn default() -> Self {
        Self {
            size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Parses the leading integer of `input`, e.g. `" 12abc"` → `12`.
///
/// Saturates instead of overflowing.
fn parse_leading_int(input: &str) -> Option<i128> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = &digits[..digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i128, |acc, b| {
        acc.saturating_mul(10).saturating_add(i128::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}
