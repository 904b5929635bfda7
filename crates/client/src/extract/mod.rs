//! Fixed-rule page extraction.
//!
//! Pulls a fixed set of fields out of raw HTML and combines them into a
//! single length-bounded content blob:
//!
//! - `<title>`, `meta[name="description"]`, first `<h1>`, first `<h2>`
//! - first `<article>`, first `<main>`, all `<p>` and all `<li>` texts
//!
//! The combined blob joins title, description, article, main, paragraph
//! and list-item text in that exact order, is truncated to 10,000
//! characters, and only then normalized. Extraction is best-effort:
//! malformed markup and missing elements yield empty fields, never errors.

pub mod normalize;

pub use normalize::{clean_opt, clean_text};

use scraper::{Html, Selector};

/// Character cap applied to the combined blob before normalization.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Content-bearing fields of a scraped page, all normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub meta_description: String,
    pub h1: String,
    pub h2: String,
    /// Combined, truncated, normalized content blob.
    pub content: String,
}

/// Extract the fixed field set from raw HTML.
pub fn extract_page(html: &str) -> PageFields {
    let doc = Html::parse_document(html);

    let title = first_text(&doc, "title");
    let meta_description = meta_description_attr(&doc);
    let h1 = first_text(&doc, "h1");
    let h2 = first_text(&doc, "h2");
    let article = first_text(&doc, "article");
    let main = first_text(&doc, "main");
    let paragraphs = joined_text(&doc, "p");
    let list_items = joined_text(&doc, "li");

    // Raw values are combined and truncated first; normalization of the
    // blob happens after the cut so it can only shrink the result.
    let combined = [
        title.as_str(),
        meta_description.unwrap_or_default(),
        article.as_str(),
        main.as_str(),
        paragraphs.as_str(),
        list_items.as_str(),
    ]
    .join(" ");
    let combined = truncate_chars(combined.trim(), MAX_CONTENT_CHARS);

    PageFields {
        title: clean_text(&title),
        meta_description: clean_opt(meta_description),
        h1: clean_text(&h1),
        h2: clean_text(&h2),
        content: clean_text(combined),
    }
}

/// Text of the first element matching `selector`, empty when absent.
fn first_text(doc: &Html, selector: &str) -> String {
    Selector::parse(selector)
        .ok()
        .and_then(|sel| doc.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}

/// Space-joined text of every element matching `selector`, in document order.
fn joined_text(doc: &Html, selector: &str) -> String {
    let Ok(sel) = Selector::parse(selector) else {
        return String::new();
    };
    doc.select(&sel)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `content` attribute of `meta[name="description"]`, when present.
fn meta_description_attr(doc: &Html) -> Option<&str> {
    Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|sel| doc.select(&sel).next())
        .and_then(|el| el.value().attr("content"))
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
