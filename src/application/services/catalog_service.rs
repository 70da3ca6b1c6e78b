//! Resource catalog: resolves resource URIs to tweet payloads.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{RawTweet, ResourceContent, ResourceUri};
use crate::domain::normalizer::normalize;
use crate::domain::repositories::TweetRepository;
use crate::error::AppError;

/// Service serving the tweet resources.
///
/// Each call loads the archive through the repository; nothing is kept
/// between calls.
///
/// # Resources
///
/// - `tweet-list://recent` - every tweet, canonical shape, most recent first
/// - `tweet://{id}` - one canonical tweet
/// - `tweet-text://{id}` - the raw text of one tweet
pub struct CatalogService<R: TweetRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: TweetRepository + ?Sized> CatalogService<R> {
    /// Creates a new catalog service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Reads the resource addressed by `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ResourceNotFound`] for URIs outside the three
    /// resource templates, and archive errors from the repository. A valid
    /// `tweet://` or `tweet-text://` URI for an unknown id is not an error;
    /// see [`ResourceContent::not_found`].
    pub async fn read(&self, uri: &str) -> Result<Vec<ResourceContent>, AppError> {
        match uri.parse::<ResourceUri>()? {
            ResourceUri::RecentList => self.list_recent().await,
            ResourceUri::Tweet(id) => Ok(vec![self.get_tweet(uri, &id).await?]),
            ResourceUri::TweetText(id) => Ok(vec![self.get_tweet_text(uri, &id).await?]),
        }
    }

    /// Lists every tweet in canonical form with its `tweet://` URI.
    ///
    /// # Errors
    ///
    /// Returns archive errors from the repository.
    pub async fn list_recent(&self) -> Result<Vec<ResourceContent>, AppError> {
        let tweets = self.repository.load_recent().await?;

        Ok(tweets
            .iter()
            .map(|raw| ResourceContent::tweet(normalize(raw)))
            .collect())
    }

    /// Returns one tweet in canonical form.
    ///
    /// `uri` is echoed in the not-found payload.
    ///
    /// # Errors
    ///
    /// Returns archive errors from the repository.
    pub async fn get_tweet(&self, uri: &str, id: &str) -> Result<ResourceContent, AppError> {
        let tweets = self.repository.load_recent().await?;

        Ok(match find_by_id(&tweets, id) {
            Some(raw) => ResourceContent::tweet(normalize(raw)),
            None => {
                debug!("Tweet {} not found", id);
                ResourceContent::not_found(uri, id)
            }
        })
    }

    /// Returns the original text of one tweet, without link expansion or
    /// sanitizing.
    ///
    /// # Errors
    ///
    /// Returns archive errors from the repository.
    pub async fn get_tweet_text(&self, uri: &str, id: &str) -> Result<ResourceContent, AppError> {
        let tweets = self.repository.load_recent().await?;

        Ok(match find_by_id(&tweets, id) {
            Some(raw) => ResourceContent::Text {
                uri: ResourceUri::tweet_text(id),
                text: raw.raw_text().to_string(),
            },
            None => {
                debug!("Tweet {} not found", id);
                ResourceContent::not_found(uri, id)
            }
        })
    }
}

fn find_by_id<'a>(tweets: &'a [RawTweet], id: &str) -> Option<&'a RawTweet> {
    tweets
        .iter()
        .find(|tweet| tweet.id().is_some_and(|tweet_id| tweet_id == id))
}
