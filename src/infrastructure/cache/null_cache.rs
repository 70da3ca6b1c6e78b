//! No-op cache implementation used when snapshot caching is disabled.

use super::service::{ArchiveFingerprint, SnapshotCache};
use crate::domain::entities::RawTweet;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every lookup misses, so each call re-reads the archive. This is the
/// default.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (snapshot caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotCache for NullCache {
    async fn get(&self, _fingerprint: &ArchiveFingerprint) -> Option<Arc<Vec<RawTweet>>> {
        None
    }

    async fn put(&self, _fingerprint: ArchiveFingerprint, _tweets: Arc<Vec<RawTweet>>) {}

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
