//! Chat-completions API client.
//!
//! Client for an OpenAI-compatible chat-completions endpoint (Groq by
//! default) with request validation and response normalization.
//!
//! ### Specification
//!
//! - **Endpoint**: `{base_url}/chat/completions`
//! - **Authentication**: bearer token.
//! - **Errors**: 401/403 map to auth failures, 429 to rate limiting,
//!   everything else non-2xx to an HTTP error with status.

pub mod error;
pub mod request;
pub mod response;

pub use error::CompletionError;
pub use request::{ChatMessage, ChatRequest, build_page_prompt};
pub use response::{ChatResponse, Choice, Usage};

use std::time::{Duration, Instant};

/// Default base URL for the completions API.
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// System prompt sent with every chat request.
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Completions client configuration.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API key for the completions service.
    pub api_key: String,
    /// Base URL (default: Groq's OpenAI-compatible endpoint).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Chat-completions API client.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Create a new completions client with the given configuration.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Network(std::sync::Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Ask the model to answer `query` using scraped page `content`.
    pub async fn answer_about_page(&self, query: &str, content: &str) -> Result<String, CompletionError> {
        let prompt = build_page_prompt(query, content);
        self.complete(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
            .await
    }

    /// Execute a chat-completions call and return the first answer.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let req = ChatRequest::new(&self.config.model, messages);
        req.validate()?;

        let start = Instant::now();
        let url = format!("{}/chat/completions", self.config.base_url);

        tracing::debug!(model = %self.config.model, "calling completions API");

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(CompletionError::from)?;

        let status = http_response.status();
        tracing::debug!("completions API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthError);
        }

        if status == 429 {
            return Err(CompletionError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(CompletionError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await.map_err(CompletionError::from)?;
        let response: ChatResponse =
            serde_json::from_slice(&bytes).map_err(|e| CompletionError::Parse(e.to_string()))?;

        let answer = response.answer()?.to_string();

        tracing::debug!(
            "completion finished in {:?}, {} tokens",
            start.elapsed(),
            response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0)
        );

        Ok(answer)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}
