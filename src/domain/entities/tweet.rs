//! Tweet entities: the raw archive record and its canonical projection.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::timestamp::parse_created_at;

/// Text prefix marking a retweet in the archive.
pub const RESHARE_MARKER: &str = "RT @";

/// A loosely-typed tweet as decoded from the archive.
///
/// Field lookups mirror the archive's optional fields: empty strings count as
/// absent, and numeric ids are rendered as decimal strings.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTweet {
    fields: Map<String, Value>,
}

impl RawTweet {
    /// Wraps a decoded JSON value.
    ///
    /// Returns `None` unless the value is an object with an id (`id_str` or
    /// `id`) and a text field (`full_text` or `text`).
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => {
                let tweet = Self { fields };
                tweet.is_usable().then_some(tweet)
            }
            _ => None,
        }
    }

    fn is_usable(&self) -> bool {
        self.id().is_some()
            && (self.fields.get("full_text").is_some_and(Value::is_string)
                || self.fields.get("text").is_some_and(Value::is_string))
    }

    /// `id_str`, falling back to `id`.
    pub fn id(&self) -> Option<String> {
        ["id_str", "id"]
            .iter()
            .find_map(|key| id_string(self.fields.get(*key)))
    }

    /// Original text: `full_text`, falling back to `text`, else empty.
    pub fn raw_text(&self) -> &str {
        first_str(&self.fields, &["full_text", "text"]).unwrap_or("")
    }

    /// `created_at` exactly as stored in the archive.
    pub fn created_at(&self) -> Option<&str> {
        self.fields.get("created_at").and_then(Value::as_str)
    }

    /// Parsed `created_at`, `None` when missing or unparsable.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at().and_then(parse_created_at)
    }

    /// `user.name`, falling back to `user.display_name`, else empty.
    pub fn display_name(&self) -> &str {
        self.user_field(&["name", "display_name"])
    }

    /// `user.screen_name`, falling back to `user.username`, else empty.
    pub fn username(&self) -> &str {
        self.user_field(&["screen_name", "username"])
    }

    fn user_field(&self, keys: &[&str]) -> &str {
        self.fields
            .get("user")
            .and_then(Value::as_object)
            .and_then(|user| first_str(user, keys))
            .unwrap_or("")
    }

    /// Ordered link entities from `entities.urls`.
    ///
    /// A missing or non-array `urls` yields no entities.
    pub fn url_entities(&self) -> Vec<UrlEntity> {
        self.fields
            .get("entities")
            .and_then(|entities| entities.get("urls"))
            .and_then(Value::as_array)
            .map(|urls| urls.iter().map(UrlEntity::from_value).collect())
            .unwrap_or_default()
    }

    /// Returns true for retweets, which start with `RT @`.
    pub fn is_reshare(&self) -> bool {
        self.raw_text().starts_with(RESHARE_MARKER)
    }
}

fn first_str<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// A shortened link and its expansion, from `entities.urls`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntity {
    pub url: Option<String>,
    pub expanded_url: Option<String>,
}

impl UrlEntity {
    pub fn new(url: impl Into<String>, expanded_url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            expanded_url: Some(expanded_url.into()),
        }
    }

    fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            url: field("url"),
            expanded_url: field("expanded_url"),
        }
    }

    /// Both URLs, when both are present and non-empty.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.expanded_url.as_deref()) {
            (Some(short), Some(expanded)) if !short.is_empty() && !expanded.is_empty() => {
                Some((short, expanded))
            }
            _ => None,
        }
    }
}

/// Stable projection of a tweet returned by the full-record resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTweet {
    pub id: String,
    pub display_name: String,
    pub username: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
