//! Redaction of mentions, hashtags and links for sampled tweet text.
//!
//! Sampled text is handed to language models, so handles and links are
//! replaced with fixed tokens. Full-record and text-only resources never go
//! through this module.

use regex::Regex;
use std::sync::OnceLock;

pub const LINK_TOKEN: &str = "[LINK]";
pub const USERNAME_TOKEN: &str = "[USERNAME]";
pub const HASHTAG_TOKEN: &str = "[HASHTAG]";

fn leading_mentions_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:@[A-Za-z0-9_]+\s+)+").expect("valid leading mentions regex"))
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("valid link regex"))
}

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@[A-Za-z0-9_]+").expect("valid mention regex"))
}

fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#[A-Za-z0-9_]+").expect("valid hashtag regex"))
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"))
}

/// Sanitizes tweet text for sampling.
///
/// # Steps
///
/// 1. Strip the leading run of `@handle ` mentions (reply/retweet headers)
/// 2. Replace links with `[LINK]`, remaining mentions with `[USERNAME]`
///    and hashtags with `[HASHTAG]`
/// 3. Collapse whitespace runs and trim
///
/// Leading mentions must be stripped before redaction, otherwise they would
/// already be turned into `[USERNAME]` tokens.
///
/// Applying the function twice yields the same result as applying it once.
pub fn sanitize_text(text: &str) -> String {
    let stripped = leading_mentions_re().replace(text, "");
    let redacted = link_re().replace_all(&stripped, LINK_TOKEN);
    let redacted = mention_re().replace_all(&redacted, USERNAME_TOKEN);
    let redacted = hashtag_re().replace_all(&redacted, HASHTAG_TOKEN);

    whitespace_run_re()
        .replace_all(&redacted, " ")
        .trim()
        .to_string()
}
