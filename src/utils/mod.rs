//! Text and timestamp helpers used by the domain and services.
//!
//! - [`url_expander`] - Shortened link expansion
//! - [`text_sanitizer`] - Mention, hashtag and link redaction for samples
//! - [`timestamp`] - `created_at` parsing

pub mod text_sanitizer;
pub mod timestamp;
pub mod url_expander;
