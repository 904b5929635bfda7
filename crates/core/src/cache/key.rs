//! Cache key derivation for scraped pages.

/// Namespace prefix for scrape cache entries.
const KEY_NAMESPACE: &str = "scrapes:";

/// Maximum number of identifier characters carried into the key.
///
/// Bounds key size against backing-store limits. Two URLs agreeing on
/// their first 200 characters share a key; that collision is a documented
/// limitation, kept for parity with existing cache contents.
const MAX_IDENTIFIER_CHARS: usize = 200;

/// Derive the cache key for a URL.
pub fn scrape_cache_key(url: &str) -> String {
    let truncated: String = url.chars().take(MAX_IDENTIFIER_CHARS).collect();
    format!("{KEY_NAMESPACE}{truncated}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_stability() {
        assert_eq!(scrape_cache_key("https://example.com"), scrape_cache_key("https://example.com"));
    }

    #[test]
    fn test_key_namespaced() {
        assert_eq!(scrape_cache_key("https://example.com"), "scrapes:https://example.com");
    }

    #[test]
    fn test_short_url_kept_whole() {
        let key = scrape_cache_key("https://a.io/p");
        assert!(key.ends_with("https://a.io/p"));
    }

    #[test]
    fn test_truncation_collision() {
        let prefix = format!("https://example.com/{}", "a".repeat(200));
        let one = format!("{prefix}-first");
        let two = format!("{prefix}-second");
        assert_ne!(one, two);
        assert_eq!(scrape_cache_key(&one), scrape_cache_key(&two));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let url: String = "é".repeat(250);
        let key = scrape_cache_key(&url);
        assert_eq!(key.chars().count(), "scrapes:".len() + 200);
    }
}
