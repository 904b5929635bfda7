//! Read/write layer between the scrape engine and the key-value store.
//!
//! Owns serialization of `ScrapedContent` and defensive decoding of stored
//! values. Read failures of any kind degrade to a cache miss; they are
//! logged, never propagated.

use std::sync::Arc;

use serde_json::Value;

use super::{KvStore, key::scrape_cache_key};
use crate::Error;
use crate::content::ScrapedContent;

/// TTL applied to freshly scraped entries.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Scrape cache over an injected key-value store.
#[derive(Clone)]
pub struct ScrapeCache {
    store: Arc<dyn KvStore>,
}

impl ScrapeCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Look up a cached scrape for `url`.
    ///
    /// Returns `None` on absence, expiry, store failure, or a value that
    /// does not decode; the latter two are logged.
    pub async fn get(&self, url: &str) -> Option<ScrapedContent> {
        let key = scrape_cache_key(url);
        tracing::debug!(%key, "checking scrape cache");

        let value = match self.store.get(&key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(%url, "cache miss");
                return None;
            }
            Err(err) => {
                tracing::warn!(%url, %err, "cache read failed, treating as miss");
                return None;
            }
        };

        match decode_content(value) {
            Ok(content) => {
                tracing::debug!(%url, "cache hit");
                Some(content)
            }
            Err(err) => {
                tracing::warn!(%url, %err, "cached value failed to decode, treating as miss");
                None
            }
        }
    }

    /// Store a scrape result under `url`'s derived key with a hard TTL.
    ///
    /// Overwrites any prior entry for the same key.
    pub async fn put(&self, url: &str, content: &ScrapedContent, ttl_secs: u64) -> Result<(), Error> {
        let key = scrape_cache_key(url);
        let encoded =
            serde_json::to_string(content).map_err(|e| Error::StoreDecode(format!("failed to encode entry: {e}")))?;
        self.store.set_ex(&key, encoded, ttl_secs).await
    }
}

/// Decode a stored value into `ScrapedContent`.
///
/// The backing store may hand back either the encoded JSON text or an
/// already-structured value; both shapes are accepted.
fn decode_content(value: Value) -> Result<ScrapedContent, Error> {
    match value {
        Value::String(raw) => serde_json::from_str(&raw).map_err(|e| Error::StoreDecode(e.to_string())),
        structured => serde_json::from_value(structured).map_err(|e| Error::StoreDecode(e.to_string())),
    }
}
