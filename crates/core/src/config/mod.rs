//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PAGETALK_*)
//! 2. TOML config file (if PAGETALK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PAGETALK_*)
/// 2. TOML config file (if PAGETALK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    ///
    /// Set via PAGETALK_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// REST endpoint of the key-value store backing the scrape cache.
    ///
    /// Set via PAGETALK_KV_REST_URL environment variable. When absent the
    /// server falls back to an in-process store.
    #[serde(default)]
    pub kv_rest_url: Option<String>,

    /// Access token for the key-value store.
    ///
    /// Set via PAGETALK_KV_REST_TOKEN environment variable.
    #[serde(default)]
    pub kv_rest_token: Option<String>,

    /// API key for the chat-completions service.
    ///
    /// Set via PAGETALK_LLM_API_KEY environment variable.
    /// Required only when the chat route is called.
    #[serde(default)]
    pub llm_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible completions API.
    ///
    /// Set via PAGETALK_LLM_API_URL environment variable.
    #[serde(default = "default_llm_api_url")]
    pub llm_api_url: String,

    /// Model identifier passed to the completions API.
    ///
    /// Set via PAGETALK_LLM_MODEL environment variable.
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// User-Agent string for outbound HTTP requests.
    ///
    /// Set via PAGETALK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via PAGETALK_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Outbound HTTP request timeout in milliseconds.
    ///
    /// Set via PAGETALK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// TTL for cached scrape entries in seconds.
    ///
    /// Set via PAGETALK_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Requests allowed per client per rate-limit window.
    ///
    /// Set via PAGETALK_RATE_LIMIT_REQUESTS environment variable.
    #[serde(default = "default_rate_limit_requests")]
    pub rate_limit_requests: i64,

    /// Rate-limit window length in seconds.
    ///
    /// Set via PAGETALK_RATE_LIMIT_WINDOW_SECS environment variable.
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_llm_api_url() -> String {
    "https://api.groq.com/openai/v1".into()
}

fn default_llm_model() -> String {
    "llama-3.1-8b-instant".into()
}

fn default_user_agent() -> String {
    "pagetalk/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_rate_limit_requests() -> i64 {
    5
}

fn default_rate_limit_window_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            kv_rest_url: None,
            kv_rest_token: None,
            llm_api_key: None,
            llm_api_url: default_llm_api_url(),
            llm_model: default_llm_model(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            rate_limit_requests: default_rate_limit_requests(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PAGETALK_`
    /// 2. TOML file from `PAGETALK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PAGETALK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PAGETALK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the completions API key is available (deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_llm_api_key(&self) -> Result<&str, ConfigError> {
        self.llm_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "llm_api_key".into(),
            hint: "Set PAGETALK_LLM_API_KEY environment variable".into(),
        })
    }

    /// Key-value store credentials, when both are configured.
    pub fn kv_credentials(&self) -> Option<(&str, &str)> {
        match (self.kv_rest_url.as_deref(), self.kv_rest_token.as_deref()) {
            (Some(url), Some(token)) => Some((url, token)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.user_agent, "pagetalk/0.1");
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.rate_limit_requests, 5);
        assert_eq!(config.rate_limit_window_secs, 60);
        assert!(config.kv_rest_url.is_none());
        assert!(config.llm_api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_require_llm_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_llm_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_llm_api_key_present() {
        let config = AppConfig { llm_api_key: Some("test-key".into()), ..Default::default() };
        assert_eq!(config.require_llm_api_key().unwrap(), "test-key");
    }

    #[test]
    fn test_kv_credentials_requires_both() {
        let config = AppConfig { kv_rest_url: Some("https://kv.example".into()), ..Default::default() };
        assert!(config.kv_credentials().is_none());

        let config = AppConfig {
            kv_rest_url: Some("https://kv.example".into()),
            kv_rest_token: Some("token".into()),
            ..Default::default()
        };
        assert_eq!(config.kv_credentials(), Some(("https://kv.example", "token")));
    }
}
