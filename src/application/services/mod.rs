//! Business logic services for the application layer.

pub mod catalog_service;
pub mod sample_service;

pub use catalog_service::CatalogService;
pub use sample_service::SampleService;
