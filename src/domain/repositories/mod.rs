//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for archive access
//! - Implementations live in `crate::infrastructure::archive`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`TweetRepository`] - Decoded, recency-sorted tweets from the export archive

pub mod tweet_repository;

pub use tweet_repository::TweetRepository;

#[cfg(test)]
pub use tweet_repository::MockTweetRepository;
