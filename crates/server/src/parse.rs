//! Chat message parsing.
//!
//! Splits a free-text message into an embedded URL and the residual
//! query: the first `http(s)://` token is the URL, and the query is the
//! message with that token removed.

use std::sync::OnceLock;

use regex::Regex;

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| Regex::new(r"https?://\S+").expect("URL regex is valid"))
}

/// Split `message` into `(url, query)`.
///
/// When no URL is present the whole trimmed message becomes the query.
pub fn parse_message(message: &str) -> (Option<String>, String) {
    match url_regex().find(message) {
        Some(found) => {
            let url = found.as_str().to_string();
            let query = message.replacen(found.as_str(), "", 1).trim().to_string();
            (Some(url), query)
        }
        None => (None, message.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_and_query() {
        let (url, query) = parse_message("summarize https://example.com/post please");
        assert_eq!(url.as_deref(), Some("https://example.com/post"));
        assert_eq!(query, "summarize  please");
    }

    #[test]
    fn test_no_url() {
        let (url, query) = parse_message("  just a question  ");
        assert!(url.is_none());
        assert_eq!(query, "just a question");
    }

    #[test]
    fn test_url_only() {
        let (url, query) = parse_message("https://example.com");
        assert_eq!(url.as_deref(), Some("https://example.com"));
        assert_eq!(query, "");
    }

    #[test]
    fn test_first_url_wins() {
        let (url, query) = parse_message("compare https://a.example and https://b.example");
        assert_eq!(url.as_deref(), Some("https://a.example"));
        assert!(query.contains("https://b.example"));
    }

    #[test]
    fn test_http_scheme() {
        let (url, _) = parse_message("open http://plain.example now");
        assert_eq!(url.as_deref(), Some("http://plain.example"));
    }

    #[test]
    fn test_empty_message() {
        let (url, query) = parse_message("");
        assert!(url.is_none());
        assert_eq!(query, "");
    }
}
