//! Repository trait for tweet archive access.

use crate::domain::entities::RawTweet;
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the tweets of one export archive.
///
/// # Implementations
///
/// - [`crate::infrastructure::archive::ZipTweetRepository`] - Zip export reader
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/archive_reader.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Loads every usable tweet, most recent first.
    ///
    /// The returned snapshot may be shared with the snapshot cache.
    ///
    /// Records without an id or text are skipped. Tweets with a missing or
    /// unparsable `created_at` come last, in archive order.
    ///
    /// # Errors
    ///
    /// - [`AppError::ArchiveOpen`] if the archive cannot be opened
    /// - [`AppError::EntryNotFound`] if the payload entry is missing
    /// - [`AppError::PayloadDecode`] if the payload cannot be decoded
    async fn load_recent(&self) -> Result<Arc<Vec<RawTweet>>, AppError>;

    /// Checks that the archive can be opened and holds the payload entry.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> Result<(), AppError>;
}
