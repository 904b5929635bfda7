//! REST key-value store client.
//!
//! Speaks the Upstash-style Redis REST protocol: one command per request,
//! path-encoded arguments, bearer-token auth, and a `{"result": ...}` /
//! `{"error": ...}` reply envelope. Values are sent in the request body so
//! arbitrarily large entries stay out of the URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use pagetalk_core::{Error, KvStore};

/// Default request timeout for store operations.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reply envelope for every store command.
#[derive(Debug, Deserialize)]
struct KvReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Remote key-value store reachable over HTTPS.
#[derive(Debug, Clone)]
pub struct RestKvStore {
    http: Client,
    base: Url,
    token: String,
}

impl RestKvStore {
    /// Create a client for the store at `base_url` using `token` for auth.
    pub fn new(base_url: &str, token: &str) -> Result<Self, Error> {
        let base = Url::parse(base_url).map_err(|e| Error::StoreError(format!("invalid store URL: {e}")))?;

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::StoreError(format!("failed to build store client: {e}")))?;

        Ok(Self { http, base, token: token.to_string() })
    }

    /// Build a command URL, percent-encoding each path segment.
    ///
    /// Keys routinely contain full URLs; segment encoding keeps their
    /// slashes from being read as path separators.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::StoreError("store URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn command(&self, request: reqwest::RequestBuilder) -> Result<Option<Value>, Error> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::StoreError(format!("store request failed: {e}")))?;

        let status = response.status();
        let reply: KvReply = response
            .json()
            .await
            .map_err(|e| Error::StoreError(format!("malformed store reply: {e}")))?;

        if let Some(message) = reply.error {
            return Err(Error::StoreError(message));
        }
        if !status.is_success() {
            return Err(Error::StoreError(format!("store replied with status {}", status.as_u16())));
        }

        Ok(reply.result)
    }
}

#[async_trait]
impl KvStore for RestKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let url = self.endpoint(&["get", key])?;
        match self.command(self.http.get(url)).await? {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(value)),
        }
    }

    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), Error> {
        let mut url = self.endpoint(&["set", key])?;
        url.query_pairs_mut().append_pair("EX", &ttl_secs.to_string());
        self.command(self.http.post(url).body(value)).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, Error> {
        let url = self.endpoint(&["incr", key])?;
        let result = self.command(self.http.post(url)).await?;
        result
            .as_ref()
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::StoreError("incr reply was not an integer".to_string()))
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool, Error> {
        let url = self.endpoint(&["expire", key, &ttl_secs.to_string()])?;
        let result = self.command(self.http.post(url)).await?;
        Ok(result.and_then(|v| v.as_i64()) == Some(1))
    }
}
