//! # Tweet Archive
//!
//! Serves a personal Twitter/X export archive to AI assistants as Model
//! Context Protocol resources and tools.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Tweet records, resource URIs, normalization, repository trait
//! - **Application Layer** ([`application`]) - Resource catalog and sampling services
//! - **Infrastructure Layer** ([`infrastructure`]) - Zip archive reader and snapshot cache
//! - **API Layer** ([`api`]) - JSON-RPC dispatcher, stdio and HTTP transports
//!
//! ## Resources and Tools
//!
//! - `tweet-list://recent` - every tweet, most recent first
//! - `tweet://{id}` - one tweet with expanded links
//! - `tweet-text://{id}` - the original text of one tweet
//! - `sample_tweet_texts` - random sample of sanitized original tweet texts
//!
//! ## Quick Start
//!
//! ```bash
//! # stdio (for MCP clients that spawn the server)
//! cargo run -- ~/twitter-archive.zip
//!
//! # HTTP
//! cargo run -- ~/twitter-archive.zip --transport http --listen 127.0.0.1:3000
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CatalogService, SampleService};
    pub use crate::domain::entities::{CanonicalTweet, RawTweet, ResourceContent, SampleRequest};
    pub use crate::domain::repositories::TweetRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::archive::ZipTweetRepository;
    pub use crate::state::AppState;
}
