//! Core domain entities for the tweet archive.
//!
//! # Entity Types
//!
//! - [`RawTweet`] - A loosely-typed record as decoded from the archive
//! - [`CanonicalTweet`] - The stable projection served by the full-record resources
//! - [`UrlEntity`] - A shortened link and its expansion
//! - [`ResourceUri`] / [`ResourceContent`] - Addressable resources and their payloads
//! - [`SampleRequest`] - Parameters of the sampling tool

pub mod resource;
pub mod sample;
pub mod tweet;

pub use resource::{ResourceContent, ResourceUri, TWEET_LIST_URI};
pub use sample::{DEFAULT_SAMPLE_SIZE, SampleRequest};
pub use tweet::{CanonicalTweet, RESHARE_MARKER, RawTweet, UrlEntity};
