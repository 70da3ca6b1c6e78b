//! In-process snapshot cache.

use super::service::{ArchiveFingerprint, SnapshotCache};
use crate::domain::entities::RawTweet;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct Snapshot {
    fingerprint: ArchiveFingerprint,
    tweets: Arc<Vec<RawTweet>>,
}

/// Holds the most recently decoded snapshot of one archive.
///
/// A lookup hits only when the fingerprint matches exactly; storing a new
/// fingerprint replaces the previous snapshot.
#[derive(Default)]
pub struct MemoryCache {
    slot: RwLock<Option<Snapshot>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using MemoryCache for archive snapshots");
        Self::default()
    }
}

#[async_trait]
impl SnapshotCache for MemoryCache {
    async fn get(&self, fingerprint: &ArchiveFingerprint) -> Option<Arc<Vec<RawTweet>>> {
        let slot = self.slot.read().await;

        slot.as_ref()
            .filter(|snapshot| &snapshot.fingerprint == fingerprint)
            .map(|snapshot| Arc::clone(&snapshot.tweets))
    }

    async fn put(&self, fingerprint: ArchiveFingerprint, tweets: Arc<Vec<RawTweet>>) {
        *self.slot.write().await = Some(Snapshot { fingerprint, tweets });
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
