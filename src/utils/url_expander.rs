//! Expansion of shortened links inside tweet text.

use crate::domain::entities::UrlEntity;

/// Replaces every shortened link in `text` with its expanded form.
///
/// Entities are applied in order. Each entity replaces all literal
/// occurrences of its short URL; an entity lacking either URL is skipped.
///
/// Replacement is plain substring matching. When one short URL is a prefix of
/// another, the entity listed first wins for the overlapping text.
///
/// # Examples
///
/// ```ignore
/// let urls = vec![UrlEntity::new("https://t.co/a", "https://example.com")];
/// assert_eq!(expand_links("see https://t.co/a", &urls), "see https://example.com");
/// ```
pub fn expand_links(text: &str, urls: &[UrlEntity]) -> String {
    let mut result = text.to_string();

    for entity in urls {
        if let Some((short, expanded)) = entity.pair() {
            result = result.replace(short, expanded);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(short: &str, expanded: &str) -> UrlEntity {
        UrlEntity::new(short, expanded)
    }

    #[test]
    fn test_expand_single_link() {
        let urls = vec![entity("https://t.co/abc", "https://example.com/article")];

        let result = expand_links("Read this https://t.co/abc", &urls);

        assert_eq!(result, "Read this https://example.com/article");
    }

    #[test]
    fn test_expand_replaces_every_occurrence() {
        let urls = vec![entity("https://t.co/abc", "https://example.com")];

        let result = expand_links("https://t.co/abc and again https://t.co/abc", &urls);

        assert!(!result.contains("https://t.co/abc"));
        assert_eq!(result.matches("https://example.com").count(), 2);
    }

    #[test]
    fn test_expand_multiple_entities_in_order() {
        let urls = vec![
            entity("https://t.co/one", "https://one.example"),
            entity("https://t.co/two", "https://two.example"),
        ];

        let result = expand_links("https://t.co/two https://t.co/one", &urls);

        assert_eq!(result, "https://two.example https://one.example");
    }

    #[test]
    fn test_incomplete_entity_is_noop() {
        let urls = vec![
            UrlEntity {
                url: Some("https://t.co/abc".to_string()),
                expanded_url: None,
            },
            UrlEntity {
                url: None,
                expanded_url: Some("https://example.com".to_string()),
            },
        ];

        let text = "keep https://t.co/abc";
        assert_eq!(expand_links(text, &urls), text);
    }

    #[test]
    fn test_empty_short_url_is_noop() {
        let urls = vec![entity("", "https://example.com")];

        assert_eq!(expand_links("abc", &urls), "abc");
    }

    #[test]
    fn test_no_entities_leaves_text_unchanged() {
        assert_eq!(expand_links("plain text", &[]), "plain text");
    }

    #[test]
    fn test_prefix_collision_follows_entity_order() {
        let urls = vec![
            entity("https://t.co/a", "https://first.example"),
            entity("https://t.co/ab", "https://second.example"),
        ];

        let result = expand_links("https://t.co/ab", &urls);

        assert_eq!(result, "https://first.exampleb");
    }
}
