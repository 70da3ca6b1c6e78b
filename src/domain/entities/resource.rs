//! Addressable resources and the content they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::json;

use super::tweet::CanonicalTweet;
use crate::error::AppError;

pub const TWEET_LIST_URI: &str = "tweet-list://recent";
pub const TWEET_SCHEME: &str = "tweet://";
pub const TWEET_TEXT_SCHEME: &str = "tweet-text://";

/// A parsed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    /// `tweet-list://recent`
    RecentList,
    /// `tweet://{id}`
    Tweet(String),
    /// `tweet-text://{id}`
    TweetText(String),
}

impl ResourceUri {
    pub fn tweet(id: &str) -> String {
        format!("{TWEET_SCHEME}{id}")
    }

    pub fn tweet_text(id: &str) -> String {
        format!("{TWEET_TEXT_SCHEME}{id}")
    }
}

impl FromStr for ResourceUri {
    type Err = AppError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        if uri == TWEET_LIST_URI {
            return Ok(Self::RecentList);
        }

        if let Some(id) = template_id(uri, TWEET_TEXT_SCHEME) {
            return Ok(Self::TweetText(id.to_string()));
        }

        if let Some(id) = template_id(uri, TWEET_SCHEME) {
            return Ok(Self::Tweet(id.to_string()));
        }

        Err(AppError::ResourceNotFound(uri.to_string()))
    }
}

/// Extracts the `{id}` segment of a `scheme://{id}` template.
fn template_id<'a>(uri: &'a str, scheme: &str) -> Option<&'a str> {
    uri.strip_prefix(scheme)
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::RecentList => f.write_str(TWEET_LIST_URI),
            Self::Tweet(id) => write!(f, "{TWEET_SCHEME}{id}"),
            Self::TweetText(id) => write!(f, "{TWEET_TEXT_SCHEME}{id}"),
        }
    }
}

/// One entry of a resource read result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceContent {
    /// Full canonical record with its `tweet://` identifier.
    Tweet {
        uri: String,
        #[serde(flatten)]
        tweet: CanonicalTweet,
    },
    /// Text payload: raw tweet text or a serialized not-found error.
    Text { uri: String, text: String },
}

impl ResourceContent {
    pub fn tweet(tweet: CanonicalTweet) -> Self {
        Self::Tweet {
            uri: ResourceUri::tweet(&tweet.id),
            tweet,
        }
    }

    /// Not-found result for a lookup, echoing the requested URI and id.
    pub fn not_found(uri: &str, id: &str) -> Self {
        Self::Text {
            uri: uri.to_string(),
            text: json!({ "error": "Tweet not found", "id": id }).to_string(),
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            Self::Tweet { uri, .. } | Self::Text { uri, .. } => uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_uri() {
        assert_eq!(
            "tweet-list://recent".parse::<ResourceUri>().unwrap(),
            ResourceUri::RecentList
        );
    }

    #[test]
    fn test_parse_tweet_uri() {
        assert_eq!(
            "tweet://12345".parse::<ResourceUri>().unwrap(),
            ResourceUri::Tweet("12345".to_string())
        );
    }

    #[test]
    fn test_parse_tweet_text_uri() {
        assert_eq!(
            "tweet-text://12345".parse::<ResourceUri>().unwrap(),
            ResourceUri::TweetText("12345".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        for uri in ["tweet://", "tweet-list://older", "file:///etc/passwd", "tweet://1/2"] {
            let result = uri.parse::<ResourceUri>();
            assert!(
                matches!(result, Err(AppError::ResourceNotFound(_))),
                "{uri} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trips_identifier() {
        let uri = ResourceUri::TweetText("9".to_string());
        assert_eq!(uri.to_string(), "tweet-text://9");
    }

    #[test]
    fn test_not_found_payload_shape() {
        let content = ResourceContent::not_found("tweet://42", "42");
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value["uri"], "tweet://42");
        let error: serde_json::Value =
            serde_json::from_str(value["text"].as_str().unwrap()).unwrap();
        assert_eq!(error["error"], "Tweet not found");
        assert_eq!(error["id"], "42");
    }

    #[test]
    fn test_tweet_content_flattens_record() {
        let content = ResourceContent::tweet(CanonicalTweet {
            id: "7".to_string(),
            display_name: "Bob".to_string(),
            username: "bob".to_string(),
            text: "hello".to_string(),
            created_at: None,
        });

        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["uri"], "tweet://7");
        assert_eq!(value["id"], "7");
        assert_eq!(value["username"], "bob");
        assert!(value.get("createdAt").is_none());
    }
}
