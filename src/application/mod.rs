//! Application layer services implementing the catalog and sampling logic.
//!
//! Services consume the [`crate::domain::repositories::TweetRepository`] trait
//! and provide a clean API for the protocol handlers.
//!
//! # Available Services
//!
//! - [`services::catalog_service::CatalogService`] - Resource reads (list, tweet, tweet text)
//! - [`services::sample_service::SampleService`] - Random sanitized samples

pub mod services;
