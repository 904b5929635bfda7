//! TTL-based key-value cache for scraped pages.
//!
//! This module provides the cache abstraction the scrape engine runs
//! against:
//!
//! - Namespaced, length-bounded key derivation
//! - An async `KvStore` trait over a string-keyed backing store
//! - `ScrapeCache`, the read/write layer with defensive value decoding
//! - An in-memory store for tests and credential-less runs

pub mod key;
pub mod memory;
pub mod store;

pub use crate::Error;

use async_trait::async_trait;
use serde_json::Value;

pub use key::scrape_cache_key;
pub use memory::MemoryStore;
pub use store::ScrapeCache;

/// Async key-value store with expiry semantics.
///
/// `get` on an absent or expired key returns `Ok(None)`, never an error.
/// `set_ex` always overwrites; `ttl_secs` is a hard expiry after which the
/// key behaves as absent even without an explicit deletion.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error>;

    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), Error>;

    /// Atomically increment an integer counter, creating it at 1.
    async fn incr(&self, key: &str) -> Result<i64, Error>;

    /// Set an expiry on an existing key. Returns false if the key is absent.
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, Error>;
}
