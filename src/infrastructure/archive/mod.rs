//! Export archive reader.
//!
//! - [`ZipTweetRepository`] - Opens the zip, reads `data/tweets.js`
//! - [`payload`] - Header stripping, decoding, unwrapping and sorting
//! - [`literal`] - Sandboxed parser used when the payload is not strict JSON

pub mod literal;
pub mod payload;
mod zip_repository;

pub use zip_repository::{DEFAULT_MAX_PAYLOAD_BYTES, TWEETS_ENTRY, ZipTweetRepository};
