//! Fixed-window rate limiting backed by the shared key-value store.
//!
//! Each client gets a counter per window (`ratelimit:{client}:{window}`)
//! that is incremented on every request and expires with the window.
//! Store failures fail open: a broken cache should degrade the gate, not
//! take the service down.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pagetalk_core::KvStore;

use crate::state::AppState;

/// Key namespace for rate-limit counters.
const KEY_NAMESPACE: &str = "ratelimit";

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: i64,
    pub remaining: i64,
    /// Unix timestamp at which the current window resets.
    pub reset_unix: i64,
}

/// Fixed-window per-client request limiter.
pub struct RateLimiter {
    store: Arc<dyn KvStore>,
    limit: i64,
    window_secs: u64,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KvStore>, limit: i64, window_secs: u64) -> Self {
        Self { store, limit, window_secs }
    }

    /// Record a request for `client` and decide whether it may proceed.
    pub async fn check(&self, client: &str) -> RateLimitDecision {
        let now = chrono::Utc::now().timestamp();
        let window = now.div_euclid(self.window_secs as i64);
        let key = format!("{KEY_NAMESPACE}:{client}:{window}");
        let reset_unix = (window + 1) * self.window_secs as i64;

        let count = match self.store.incr(&key).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(%client, %err, "rate-limit counter unavailable, allowing request");
                return RateLimitDecision { allowed: true, limit: self.limit, remaining: self.limit - 1, reset_unix };
            }
        };

        // First hit of the window creates the counter; bound its lifetime.
        if count == 1
            && let Err(err) = self.store.expire(&key, self.window_secs).await
        {
            tracing::warn!(%client, %err, "failed to set rate-limit window expiry");
        }

        RateLimitDecision {
            allowed: count <= self.limit,
            limit: self.limit,
            remaining: (self.limit - count).max(0),
            reset_unix,
        }
    }
}

/// Client identity for rate limiting: first `X-Forwarded-For` hop,
/// falling back to localhost.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

fn apply_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    let entries = [
        ("x-ratelimit-limit", decision.limit.to_string()),
        ("x-ratelimit-remaining", decision.remaining.to_string()),
        ("x-ratelimit-reset", decision.reset_unix.to_string()),
    ];
    for (name, value) in entries {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name, value);
        }
    }
}

/// Axum middleware enforcing the limit in front of the application routes.
pub async fn rate_limit_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = client_ip(request.headers());
    let decision = state.rate_limiter.check(&client).await;

    if !decision.allowed {
        tracing::warn!(%client, "rate limit exceeded");
        let retry_after = (decision.reset_unix - chrono::Utc::now().timestamp()).max(0);

        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Rate limit exceeded. Try again later." })),
        )
            .into_response();
        apply_limit_headers(response.headers_mut(), &decision);
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    let mut response = next.run(request).await;
    apply_limit_headers(response.headers_mut(), &decision);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use pagetalk_core::{Error, MemoryStore};
    use serde_json::Value;

    fn limiter(limit: i64) -> RateLimiter {
        RateLimiter::new(Arc::new(MemoryStore::new()), limit, 60)
    }

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let limiter = limiter(5);
        for _ in 0..5 {
            assert!(limiter.check("1.2.3.4").await.allowed);
        }
        assert!(!limiter.check("1.2.3.4").await.allowed);
    }

    #[tokio::test]
    async fn test_remaining_counts_down() {
        let limiter = limiter(3);
        assert_eq!(limiter.check("ip").await.remaining, 2);
        assert_eq!(limiter.check("ip").await.remaining, 1);
        assert_eq!(limiter.check("ip").await.remaining, 0);
        let denied = limiter.check("ip").await;
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }

    #[tokio::test]
    async fn test_clients_are_independent() {
        let limiter = limiter(1);
        assert!(limiter.check("1.1.1.1").await.allowed);
        assert!(limiter.check("2.2.2.2").await.allowed);
        assert!(!limiter.check("1.1.1.1").await.allowed);
    }

    #[tokio::test]
    async fn test_reset_is_window_aligned() {
        let limiter = limiter(5);
        let decision = limiter.check("ip").await;
        let now = chrono::Utc::now().timestamp();
        assert!(decision.reset_unix > now);
        assert!(decision.reset_unix <= now + 60);
        assert_eq!(decision.reset_unix % 60, 0);
    }

    struct BrokenStore;

    #[async_trait]
    impl KvStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Value>, Error> {
            Err(Error::StoreError("down".into()))
        }
        async fn set_ex(&self, _key: &str, _value: String, _ttl_secs: u64) -> Result<(), Error> {
            Err(Error::StoreError("down".into()))
        }
        async fn incr(&self, _key: &str) -> Result<i64, Error> {
            Err(Error::StoreError("down".into()))
        }
        async fn expire(&self, _key: &str, _ttl_secs: u64) -> Result<bool, Error> {
            Err(Error::StoreError("down".into()))
        }
    }

    #[tokio::test]
    async fn test_broken_store_fails_open() {
        let limiter = RateLimiter::new(Arc::new(BrokenStore), 1, 60);
        assert!(limiter.check("ip").await.allowed);
        assert!(limiter.check("ip").await.allowed);
    }

    #[test]
    fn test_client_ip_from_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9, 10.0.0.1"));
        assert_eq!(client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_fallback() {
        assert_eq!(client_ip(&HeaderMap::new()), "127.0.0.1");
    }
}
