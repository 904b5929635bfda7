//! In-memory key-value store.
//!
//! Backs tests and credential-less development runs. Entries expire by
//! wall-clock TTL exactly like the remote store; expiry is evaluated
//! lazily on access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use super::KvStore;
use crate::Error;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory `KvStore` implementation with TTL-based expiration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> Error {
        Error::StoreError("memory store lock poisoned".to_string())
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|map| map.values().filter(|e| !e.expired()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let entries = self.entries.read().map_err(|_| Self::lock_err())?;
        match entries.get(key) {
            Some(entry) if !entry.expired() => Ok(Some(entry.value.clone())),
            _ => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), Error> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_err())?;
        entries.insert(
            key.to_string(),
            Entry {
                value: Value::String(value),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_secs)),
            },
        );
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, Error> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_err())?;
        let next = match entries.get(key) {
            Some(entry) if !entry.expired() => {
                entry
                    .value
                    .as_i64()
                    .ok_or_else(|| Error::StoreError(format!("key {key} holds a non-integer value")))?
                    + 1
            }
            _ => 1,
        };
        entries.insert(key.to_string(), Entry { value: Value::from(next), expires_at: None });
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, Error> {
        let mut entries = self.entries.write().map_err(|_| Self::lock_err())?;
        match entries.get_mut(key) {
            Some(entry) if !entry.expired() => {
                entry.expires_at = Some(Instant::now() + Duration::from_secs(ttl_secs));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
