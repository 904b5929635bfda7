//! Client code for pagetalk.
//!
//! This crate provides the HTTP fetch pipeline, page extraction, the
//! remote key-value store client, the chat-completions client, and the
//! scrape-cache engine that ties them together.

pub mod completion;
pub mod extract;
pub mod fetch;
pub mod kv;
pub mod scrape;

pub use completion::{CompletionClient, CompletionConfig, CompletionError};
pub use extract::{PageFields, clean_text, extract_page};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, PageFetcher};
pub use kv::RestKvStore;
pub use scrape::Scraper;
