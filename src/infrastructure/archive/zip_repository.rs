//! Zip export archive implementation of [`TweetRepository`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use zip::ZipArchive;

use super::payload::decode_tweets;
use crate::domain::entities::RawTweet;
use crate::domain::repositories::TweetRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{ArchiveFingerprint, NullCache, SnapshotCache};

/// Path of the tweets payload inside the export archive.
pub const TWEETS_ENTRY: &str = "data/tweets.js";

/// Default upper bound on the decompressed payload size (256 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 256 * 1024 * 1024;

/// Reads tweets from a Twitter/X export zip.
///
/// Every [`load_recent`](TweetRepository::load_recent) call opens the archive,
/// reads and decodes the payload on the blocking thread pool, and closes the
/// archive again. With a [`SnapshotCache`] other than [`NullCache`], decoded
/// tweets are reused while the archive's size and modification time are
/// unchanged.
pub struct ZipTweetRepository {
    path: PathBuf,
    max_payload_bytes: u64,
    cache: Arc<dyn SnapshotCache>,
}

impl ZipTweetRepository {
    /// Creates a repository for the archive at `path` without caching.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            cache: Arc::new(NullCache::new()),
        }
    }

    /// Uses `cache` for decoded snapshots.
    pub fn with_cache(mut self, cache: Arc<dyn SnapshotCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the upper bound on the decompressed payload size.
    pub fn with_max_payload_bytes(mut self, max_payload_bytes: u64) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    async fn fingerprint(&self) -> Result<ArchiveFingerprint, AppError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| AppError::archive_open(self.path.display(), e))?;

        Ok(ArchiveFingerprint::new(&self.path, &metadata))
    }

    async fn read_fresh(&self) -> Result<Vec<RawTweet>, AppError> {
        let path = self.path.clone();
        let limit = self.max_payload_bytes;

        tokio::task::spawn_blocking(move || {
            let text = read_payload(&path, limit)?;
            decode_tweets(&text)
        })
        .await
        .map_err(|e| AppError::internal(format!("Archive reader task failed: {e}")))?
    }
}

#[async_trait]
impl TweetRepository for ZipTweetRepository {
    async fn load_recent(&self) -> Result<Arc<Vec<RawTweet>>, AppError> {
        let fingerprint = self.fingerprint().await?;

        if let Some(tweets) = self.cache.get(&fingerprint).await {
            debug!("Snapshot cache HIT for {}", self.path.display());
            metrics::counter!("archive_cache_hits_total").increment(1);
            return Ok(tweets);
        }
        debug!("Snapshot cache MISS for {}", self.path.display());

        let started = Instant::now();
        let tweets = Arc::new(self.read_fresh().await?);
        metrics::counter!("archive_loads_total").increment(1);
        metrics::histogram!("archive_load_seconds").record(started.elapsed().as_secs_f64());
        debug!(
            "Loaded {} tweets from {} in {:?}",
            tweets.len(),
            self.path.display(),
            started.elapsed()
        );

        self.cache.put(fingerprint, Arc::clone(&tweets)).await;

        Ok(tweets)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let archive = open_archive(&path)?;
            find_entry(&archive).map(|_| ())
        })
        .await
        .map_err(|e| AppError::internal(format!("Archive reader task failed: {e}")))?
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, AppError> {
    let file = File::open(path).map_err(|e| AppError::archive_open(path.display(), e))?;
    ZipArchive::new(file).map_err(|e| AppError::archive_open(path.display(), e))
}

fn find_entry(archive: &ZipArchive<File>) -> Result<usize, AppError> {
    archive
        .index_for_name(TWEETS_ENTRY)
        .ok_or_else(|| AppError::entry_not_found(TWEETS_ENTRY))
}

/// Reads the payload entry as text, bounded by `limit` bytes.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
fn read_payload(path: &Path, limit: u64) -> Result<String, AppError> {
    let mut archive = open_archive(path)?;
    let index = find_entry(&archive)?;
    let entry = archive
        .by_index(index)
        .map_err(|e| AppError::archive_open(path.display(), e))?;

    if entry.size() > limit {
        return Err(AppError::payload_decode(format!(
            "{TWEETS_ENTRY} is {} bytes, above the {limit} byte limit",
            entry.size()
        )));
    }

    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
    entry
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| AppError::payload_decode(format!("Failed to read {TWEETS_ENTRY}: {e}")))?;

    if bytes.len() as u64 > limit {
        return Err(AppError::payload_decode(format!(
            "{TWEETS_ENTRY} exceeds the {limit} byte limit"
        )));
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
