//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`archive`] - Zip export archive reader
//! - [`cache`] - Snapshot caching (in-memory and no-op implementations)

pub mod archive;
pub mod cache;
