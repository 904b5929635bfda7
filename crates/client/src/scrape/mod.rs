//! Scrape-cache engine.
//!
//! Orchestrates one page scrape: derive the cache key, consult the cache,
//! and on a miss fetch the page, extract its fields, and persist the
//! result with a fixed TTL.
//!
//! ### Failure policy
//! - `fetch_and_extract` never returns an error; failure is carried in the
//!   result's `error` field.
//! - Fetch failures are terminal for the call and are never cached.
//! - Cache read and write failures are logged and do not fail the call.
//!
//! ### Concurrency
//! Stateless between calls apart from the shared store. Concurrent misses
//! for the same URL may each fetch and each write; the last write wins.
//! No single-flight collapsing is attempted.

use std::sync::Arc;

use pagetalk_core::ScrapedContent;
use pagetalk_core::cache::{KvStore, ScrapeCache, store::DEFAULT_TTL_SECS};

use crate::extract::extract_page;
use crate::fetch::PageFetcher;

/// The scrape-cache engine.
#[derive(Clone)]
pub struct Scraper {
    fetcher: Arc<dyn PageFetcher>,
    cache: ScrapeCache,
    ttl_secs: u64,
}

impl Scraper {
    /// Create an engine over a page fetcher and a key-value store, with
    /// the default 1-hour TTL.
    pub fn new(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn KvStore>) -> Self {
        Self::with_ttl(fetcher, store, DEFAULT_TTL_SECS)
    }

    /// Create an engine with an explicit entry TTL.
    pub fn with_ttl(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn KvStore>, ttl_secs: u64) -> Self {
        Self { fetcher, cache: ScrapeCache::new(store), ttl_secs }
    }

    /// Scrape `url`, reading through the cache.
    ///
    /// On a hit the stored result is returned as-is, with no fetch and no
    /// re-extraction. On a miss the page is fetched and extracted; the
    /// fresh result is cached only when the fetch succeeded.
    pub async fn fetch_and_extract(&self, url: &str) -> ScrapedContent {
        if let Some(cached) = self.cache.get(url).await {
            return cached;
        }

        let html = match self.fetcher.fetch_page(url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(%url, %err, "scrape failed");
                return ScrapedContent::failure(url);
            }
        };

        let fields = extract_page(&html);
        let content =
            ScrapedContent::success(url, fields.title, fields.h1, fields.h2, fields.meta_description, fields.content);

        if let Err(err) = self.cache.put(url, &content, self.ttl_secs).await {
            tracing::warn!(%url, %err, "cache write failed, returning fresh result anyway");
        }

        content
    }
}
