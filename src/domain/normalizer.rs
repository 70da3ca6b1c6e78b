//! Projection of raw archive records into canonical tweets.

use crate::domain::entities::{CanonicalTweet, RawTweet};
use crate::utils::url_expander::expand_links;

/// Maps a raw record to its canonical shape.
///
/// Missing optional fields become empty strings; `created_at` is copied
/// verbatim. Shortened links in the text are expanded with the record's own
/// `entities.urls`.
pub fn normalize(raw: &RawTweet) -> CanonicalTweet {
    CanonicalTweet {
        id: raw.id().unwrap_or_default(),
        display_name: raw.display_name().to_string(),
        username: raw.username().to_string(),
        text: expand_links(raw.raw_text(), &raw.url_entities()),
        created_at: raw.created_at().map(str::to_string),
    }
}
