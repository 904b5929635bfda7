//! Chat-completions client error types.

use std::sync::Arc;

/// Errors from the chat-completions API client.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Missing API key.
    #[error("missing API key: llm_api_key not configured")]
    MissingApiKey,

    /// Empty prompt.
    #[error("invalid prompt: {0}")]
    InvalidPrompt(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the completions API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API returned no choices.
    #[error("empty completion response")]
    EmptyResponse,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { CompletionError::Timeout } else { CompletionError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompletionError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = CompletionError::HttpError { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
