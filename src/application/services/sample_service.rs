//! Random sampling of original tweet texts.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::entities::{RawTweet, SampleRequest};
use crate::domain::repositories::TweetRepository;
use crate::error::AppError;
use crate::utils::text_sanitizer::sanitize_text;

/// Service drawing random samples of sanitized tweet texts.
///
/// Retweets are never sampled. The random source is owned by the service;
/// use [`SampleService::with_seed`] for reproducible draws.
pub struct SampleService<R: TweetRepository + ?Sized> {
    repository: Arc<R>,
    rng: Mutex<StdRng>,
}

impl<R: TweetRepository + ?Sized> SampleService<R> {
    /// Creates a sampler seeded from the operating system.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a sampler with a fixed seed.
    pub fn with_seed(repository: Arc<R>, seed: u64) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns up to `request.size()` sanitized texts of distinct original tweets.
    ///
    /// The result is shorter when fewer original tweets exist, and empty when
    /// there are none.
    ///
    /// # Errors
    ///
    /// Returns archive errors from the repository.
    pub async fn sample_texts(&self, request: SampleRequest) -> Result<Vec<String>, AppError> {
        let tweets = self.repository.load_recent().await?;

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::internal("Sampler random source poisoned"))?;

        Ok(draw_sample(&tweets, request.size(), &mut *rng))
    }
}

/// Picks `size` distinct original tweets uniformly at random and sanitizes
/// their text.
pub fn draw_sample<G: Rng + ?Sized>(tweets: &[RawTweet], size: usize, rng: &mut G) -> Vec<String> {
    let pool: Vec<&RawTweet> = tweets.iter().filter(|tweet| !tweet.is_reshare()).collect();
    let count = size.min(pool.len());

    debug!(
        "Sampling {} of {} original tweets ({} total)",
        count,
        pool.len(),
        tweets.len()
    );

    index::sample(rng, pool.len(), count)
        .into_iter()
        .map(|i| sanitize_text(pool[i].raw_text()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DEFAULT_SAMPLE_SIZE;
    use crate::domain::repositories::MockTweetRepository;
    use serde_json::json;
    use std::collections::HashSet;

    fn tweet(id: &str, text: &str) -> RawTweet {
        RawTweet::from_value(json!({ "id": id, "full_text": text })).unwrap()
    }

    fn scenario_tweets() -> Vec<RawTweet> {
        vec![
            tweet("1", "RT @x hi"),
            tweet("2", "@a hello @b #tag http://short"),
            tweet("3", "plain"),
        ]
    }

    fn numbered_tweets(count: usize) -> Vec<RawTweet> {
        (0..count)
            .map(|i| tweet(&i.to_string(), &format!("tweet number {i}")))
            .collect()
    }

    #[test]
    fn test_draw_excludes_reshares_and_sanitizes() {
        let mut rng = StdRng::seed_from_u64(7);

        let sample = draw_sample(&scenario_tweets(), DEFAULT_SAMPLE_SIZE, &mut rng);

        let texts: HashSet<&str> = sample.iter().map(String::as_str).collect();
        assert_eq!(sample.len(), 2);
        assert_eq!(
            texts,
            HashSet::from(["hello [USERNAME] [HASHTAG] [LINK]", "plain"])
        );
    }

    #[test]
    fn test_draw_is_bounded_and_distinct() {
        let tweets = numbered_tweets(20);
        let mut rng = StdRng::seed_from_u64(42);

        for size in [1, 5, 19, 20, 50] {
            let sample = draw_sample(&tweets, size, &mut rng);
            let distinct: HashSet<&String> = sample.iter().collect();

            assert_eq!(sample.len(), size.min(20));
            assert_eq!(distinct.len(), sample.len());
        }
    }

    #[test]
    fn test_draw_empty_pool() {
        let tweets = vec![tweet("1", "RT @x only retweets")];
        let mut rng = StdRng::seed_from_u64(1);

        assert!(draw_sample(&tweets, 5, &mut rng).is_empty());
        assert!(draw_sample(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_draw_same_seed_same_sample() {
        let tweets = numbered_tweets(50);

        let first = draw_sample(&tweets, 5, &mut StdRng::seed_from_u64(99));
        let second = draw_sample(&tweets, 5, &mut StdRng::seed_from_u64(99));

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sample_texts_uses_repository() {
        let mut mock_repo = MockTweetRepository::new();
        mock_repo
            .expect_load_recent()
            .times(1)
            .returning(|| Ok(Arc::new(scenario_tweets())));

        let service = SampleService::with_seed(Arc::new(mock_repo), 3);

        let sample = service.sample_texts(SampleRequest::default()).await.unwrap();
        assert_eq!(sample.len(), 2);
        assert!(!sample.iter().any(|text| text.contains("RT")));
    }

    #[tokio::test]
    async fn test_sample_texts_seeded_services_agree() {
        let tweets = numbered_tweets(30);

        let mut samples = Vec::new();
        for _ in 0..2 {
            let tweets = tweets.clone();
            let mut mock_repo = MockTweetRepository::new();
            mock_repo
                .expect_load_recent()
                .returning(move || Ok(Arc::new(tweets.clone())));

            let service = SampleService::with_seed(Arc::new(mock_repo), 2024);
            samples.push(
                service
                    .sample_texts(SampleRequest::new(4, DEFAULT_SAMPLE_SIZE))
                    .await
                    .unwrap(),
            );
        }

        assert_eq!(samples[0], samples[1]);
    }

    #[tokio::test]
    async fn test_sample_texts_archive_error() {
        let mut mock_repo = MockTweetRepository::new();
        mock_repo
            .expect_load_recent()
            .times(1)
            .returning(|| Err(AppError::payload_decode("broken")));

        let service = SampleService::new(Arc::new(mock_repo));

        let result = service.sample_texts(SampleRequest::default()).await;
        assert!(matches!(result, Err(AppError::PayloadDecode(_))));
    }
}
