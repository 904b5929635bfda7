//! Whitespace normalization for extracted text.
//!
//! Every field that leaves the extractor goes through `clean_text` so
//! cached entries hold a canonical single-line form.

/// Collapse whitespace runs (spaces, tabs, newlines) to single ASCII
/// spaces and trim the ends.
///
/// Total and idempotent; empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// `clean_text` over an optional fragment; absence yields an empty string.
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs() {
        assert_eq!(clean_text("a   b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_trims_ends() {
        assert_eq!(clean_text("  hello world  "), "hello world");
        assert_eq!(clean_text("\n\thello\n"), "hello");
    }

    #[test]
    fn test_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t "), "");
    }

    #[test]
    fn test_absent_input() {
        assert_eq!(clean_opt(None), "");
        assert_eq!(clean_opt(Some(" a  b ")), "a b");
    }

    #[test]
    fn test_idempotent() {
        for s in ["", "  a ", "a\nb\tc", "already clean", " \u{00a0}mixed\u{3000}unicode "] {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn test_never_grows() {
        let s = "a \n b \t\t c";
        assert!(clean_text(s).len() <= s.len());
    }
}
