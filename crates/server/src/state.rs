//! Shared application state.

use std::sync::Arc;

use pagetalk_client::{CompletionClient, Scraper};

use crate::ratelimit::RateLimiter;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The scrape-cache engine.
    pub scraper: Scraper,
    /// Completions client; absent when no API key was configured.
    pub completions: Option<Arc<CompletionClient>>,
    /// Per-client request gate.
    pub rate_limiter: Arc<RateLimiter>,
}
