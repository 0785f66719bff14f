//! Article records and pagination parameters shared by the store and the HTTP surface.

use serde::{Deserialize, Serialize};

/// Number of articles returned by a listing when the caller does not ask for a limit.
pub const DEFAULT_PAGE_LIMIT: usize = 3;

/// Stored article as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Identifier assigned by the store on insertion.
    pub id: String,
    /// Article headline.
    pub title: String,
    /// Secondary headline.
    pub subtitle: String,
    /// Body text.
    pub content: String,
    /// Insertion time in a human-readable form.
    pub creation: String,
}

impl Article {
    /// Whether any of the text fields equals `term` exactly.
    pub fn matches(&self, term: &str) -> bool {
        self.title == term || self.subtitle == term || self.content == term
    }
}

/// Client payload for `POST /articles`.
///
/// Only the text fields are read. `id` and `creation` sent by a client are ignored because
/// the store assigns both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewArticle {
    /// Article headline.
    #[serde(default)]
    pub title: String,
    /// Secondary headline.
    #[serde(default)]
    pub subtitle: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
}

/// Resolved "skip `offset`, take `limit`" window over the insertion-ordered store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of articles to return.
    pub limit: usize,
    /// Number of leading articles to skip.
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Build a page from raw query-string values.
    ///
    /// Missing, non-numeric, zero, or negative values fall back to the defaults
    /// (`limit = 3`, `offset = 0`).
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            limit: parse_positive(limit).unwrap_or(defaults.limit),
            offset: parse_positive(offset).unwrap_or(defaults.offset),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let value: i64 = raw?.trim().parse().ok()?;
    usize::try_from(value).ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_when_params_missing() {
        let page = PageRequest::from_query(None, None);
        assert_eq!(page, PageRequest { limit: 3, offset: 0 });
    }

    #[test]
    fn page_parses_numeric_params() {
        let page = PageRequest::from_query(Some("5"), Some("2"));
        assert_eq!(page, PageRequest { limit: 5, offset: 2 });
    }

    #[test]
    fn page_falls_back_on_garbage_zero_and_negative() {
        assert_eq!(
            PageRequest::from_query(Some("abc"), Some("x1")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_query(Some("0"), Some("0")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_query(Some("-4"), Some("-1")),
            PageRequest::default()
        );
    }

    #[test]
    fn new_article_ignores_server_assigned_fields() {
        let payload = r#"{"id":"40","title":"mockingbird","subtitle":"ancient_mariner","content":"tale_of_two_birds","creation":"yesterday"}"#;
        let parsed: NewArticle = serde_json::from_str(payload).expect("valid payload");
        assert_eq!(parsed.title, "mockingbird");
        assert_eq!(parsed.subtitle, "ancient_mariner");
        assert_eq!(parsed.content, "tale_of_two_birds");
    }

    #[test]
    fn new_article_defaults_missing_fields() {
        let parsed: NewArticle = serde_json::from_str(r#"{"title":"only"}"#).expect("valid");
        assert_eq!(parsed.title, "only");
        assert!(parsed.subtitle.is_empty());
        assert!(parsed.content.is_empty());
    }

    #[test]
    fn new_article_rejects_wrong_types() {
        assert!(serde_json::from_str::<NewArticle>(r#"{"title":5}"#).is_err());
        assert!(serde_json::from_str::<NewArticle>(r#""just text""#).is_err());
    }

    #[test]
    fn article_matches_exact_fields_only() {
        let article = Article {
            id: "0".into(),
            title: "tail".into(),
            subtitle: "sub".into(),
            content: "body".into(),
            creation: String::new(),
        };
        assert!(article.matches("tail"));
        assert!(article.matches("sub"));
        assert!(article.matches("body"));
        assert!(!article.matches("tai"));
        assert!(!article.matches("Tail"));
    }
}
