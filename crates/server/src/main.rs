//! pagetalk server entry point.
//!
//! Boots the HTTP server: loads configuration, wires the key-value store,
//! the scrape engine, and the completions client, and serves the chat API
//! behind the rate-limit gate.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pagetalk_client::{CompletionClient, CompletionConfig, FetchClient, FetchConfig, RestKvStore, Scraper};
use pagetalk_core::{AppConfig, KvStore, MemoryStore};

mod error;
mod parse;
mod ratelimit;
mod routes;
mod state;

use ratelimit::RateLimiter;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::load()?;

    let store: Arc<dyn KvStore> = match config.kv_credentials() {
        Some((url, token)) => Arc::new(RestKvStore::new(url, token)?),
        None => {
            tracing::warn!("key-value store credentials not set, using in-process cache");
            Arc::new(MemoryStore::new())
        }
    };

    let fetch_client = FetchClient::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        max_bytes: config.max_bytes,
        timeout: config.timeout(),
        ..Default::default()
    })?;

    let scraper = Scraper::with_ttl(Arc::new(fetch_client), store.clone(), config.cache_ttl_secs);

    let completions = match config.require_llm_api_key() {
        Ok(key) => Some(Arc::new(CompletionClient::new(CompletionConfig {
            api_key: key.to_string(),
            base_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            ..Default::default()
        })?)),
        Err(err) => {
            tracing::warn!(%err, "completions API key not set, chat requests will fail");
            None
        }
    };

    let rate_limiter = Arc::new(RateLimiter::new(
        store,
        config.rate_limit_requests,
        config.rate_limit_window_secs,
    ));

    let state = AppState { scraper, completions, rate_limiter };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("pagetalk server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
