//! Domain layer containing tweet entities, normalization and the repository contract.
//!
//! # Architecture
//!
//! - [`entities`] - Raw and canonical tweet records, resource identifiers
//! - [`normalizer`] - Raw record → canonical record projection
//! - [`repositories`] - Archive access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Catalog and sampling logic lives in services (see [`crate::application::services`])
//!
//! # Request Flow
//!
//! 1. The protocol layer receives a resource read or tool call
//! 2. A service asks [`repositories::TweetRepository`] for the archive's records
//! 3. Records are projected with [`normalizer::normalize`] or sanitized for sampling

pub mod entities;
pub mod normalizer;
pub mod repositories;
