//! Snapshot cache trait and cache key.

use async_trait::async_trait;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::domain::entities::RawTweet;

/// Identity of an archive file at a point in time.
///
/// Two fingerprints are equal when the path, size and modification time
/// match, so replacing or touching the archive invalidates cached snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveFingerprint {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl ArchiveFingerprint {
    pub fn new(path: &Path, metadata: &Metadata) -> Self {
        Self {
            path: path.to_path_buf(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
        }
    }
}

/// Trait for caching decoded archive snapshots.
///
/// Callers must behave identically on a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process single-snapshot cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Returns the cached tweets for `fingerprint`, if any.
    ///
    /// A snapshot stored under an older fingerprint is a miss.
    async fn get(&self, fingerprint: &ArchiveFingerprint) -> Option<Arc<Vec<RawTweet>>>;

    /// Stores the decoded tweets for `fingerprint`.
    async fn put(&self, fingerprint: ArchiveFingerprint, tweets: Arc<Vec<RawTweet>>);

    /// Checks if the cache is usable.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;

    /// Short name shown in health output and logs.
    fn name(&self) -> &'static str;
}
