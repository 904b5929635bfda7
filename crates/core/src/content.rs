//! The `ScrapedContent` data model.
//!
//! A scraped page is either fully successful (all content-bearing fields
//! present, `error` absent) or fully failed (content fields absent, `error`
//! carrying a fixed diagnostic). Partial results do not exist.

use serde::{Deserialize, Serialize};

/// Fixed diagnostic stored on a failed scrape.
pub const SCRAPE_ERROR_MESSAGE: &str = "Error scraping the URL.";

/// First and second heading texts of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Option<String>,
    pub h2: Option<String>,
}

/// A scraped page, as cached and as returned to callers.
///
/// Wire names match the cached JSON shape (`metaDescription`, `cacheAt`)
/// so entries round-trip through the backing store unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedContent {
    /// The URL the content was derived from.
    pub url: String,
    pub title: Option<String>,
    #[serde(default)]
    pub headings: Headings,
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
    /// Combined, normalized, length-bounded content blob.
    pub content: Option<String>,
    /// `None` on success; a fixed diagnostic on failure.
    pub error: Option<String>,
    /// Millisecond timestamp set when the content was freshly computed.
    /// Absent on failures; not required to survive a cache round trip.
    #[serde(rename = "cacheAt", skip_serializing_if = "Option::is_none", default)]
    pub cache_at: Option<i64>,
}

impl ScrapedContent {
    /// Build a successful result from extracted fields.
    pub fn success(
        url: &str, title: String, h1: String, h2: String, meta_description: String, content: String,
    ) -> Self {
        Self {
            url: url.to_string(),
            title: Some(title),
            headings: Headings { h1: Some(h1), h2: Some(h2) },
            meta_description: Some(meta_description),
            content: Some(content),
            error: None,
            cache_at: Some(chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Build a failed result carrying the fixed diagnostic.
    pub fn failure(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: None,
            headings: Headings::default(),
            meta_description: None,
            content: None,
            error: Some(SCRAPE_ERROR_MESSAGE.to_string()),
            cache_at: None,
        }
    }

    /// Whether this result carries an error instead of content.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_error() {
        let content = ScrapedContent::success(
            "https://example.com",
            "Title".into(),
            "H1".into(),
            "H2".into(),
            "Desc".into(),
            "Body".into(),
        );
        assert!(!content.is_failure());
        assert_eq!(content.content.as_deref(), Some("Body"));
        assert!(content.cache_at.is_some());
    }

    #[test]
    fn test_failure_has_empty_fields() {
        let content = ScrapedContent::failure("https://bad.example");
        assert!(content.is_failure());
        assert_eq!(content.error.as_deref(), Some(SCRAPE_ERROR_MESSAGE));
        assert!(content.title.is_none());
        assert!(content.content.is_none());
        assert!(content.headings.h1.is_none());
        assert!(content.cache_at.is_none());
    }

    #[test]
    fn test_wire_names() {
        let content = ScrapedContent::success("https://example.com", "T".into(), "".into(), "".into(), "D".into(), "C".into());
        let json = serde_json::to_value(&content).unwrap();
        assert!(json.get("metaDescription").is_some());
        assert!(json.get("cacheAt").is_some());
        assert!(json.get("meta_description").is_none());
    }

    #[test]
    fn test_cache_at_omitted_on_failure() {
        let json = serde_json::to_value(ScrapedContent::failure("https://bad.example")).unwrap();
        assert!(json.get("cacheAt").is_none());
        assert!(json["error"].is_string());
    }

    #[test]
    fn test_round_trip() {
        let content = ScrapedContent::success("https://example.com", "T".into(), "A".into(), "B".into(), "D".into(), "C".into());
        let encoded = serde_json::to_string(&content).unwrap();
        let decoded: ScrapedContent = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, content);
    }
}
