//! Caching layer for decoded archive snapshots.
//!
//! Provides a [`SnapshotCache`] trait with two implementations:
//! - [`MemoryCache`] - Keeps the latest snapshot in process memory
//! - [`NullCache`] - No-op implementation, every call re-reads the archive

mod memory_cache;
mod null_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use service::{ArchiveFingerprint, SnapshotCache};
