//! Shared application state handed to every protocol handler.

use std::sync::Arc;

use crate::application::services::{CatalogService, SampleService};
use crate::domain::repositories::TweetRepository;
use crate::infrastructure::cache::SnapshotCache;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService<dyn TweetRepository>>,
    pub sampler: Arc<SampleService<dyn TweetRepository>>,
    pub repository: Arc<dyn TweetRepository>,
    pub cache: Arc<dyn SnapshotCache>,
    /// Sample size used when a tool call carries none.
    pub default_sample_size: usize,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn TweetRepository>,
        cache: Arc<dyn SnapshotCache>,
        default_sample_size: usize,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(repository.clone())),
            sampler: Arc::new(SampleService::new(repository.clone())),
            repository,
            cache,
            default_sample_size,
        }
    }

    /// Replaces the sampler, e.g. with a seeded one in tests.
    pub fn with_sampler(mut self, sampler: SampleService<dyn TweetRepository>) -> Self {
        self.sampler = Arc::new(sampler);
        self
    }
}
