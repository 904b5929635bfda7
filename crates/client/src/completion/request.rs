//! Chat-completions request types.

use serde::Serialize;

use super::CompletionError;

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Body of a chat-completions call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(model: &str, messages: Vec<ChatMessage>) -> Self {
        Self { model: model.to_string(), messages }
    }

    /// Reject requests the API would refuse anyway.
    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.model.is_empty() {
            return Err(CompletionError::InvalidPrompt("model must not be empty".to_string()));
        }
        if self.messages.iter().all(|m| m.content.trim().is_empty()) {
            return Err(CompletionError::InvalidPrompt("all messages are empty".to_string()));
        }
        Ok(())
    }
}

/// Build the user prompt that asks the model to answer `query` from
/// scraped page content.
pub fn build_page_prompt(query: &str, content: &str) -> String {
    format!(
        "Answer my question: \"{query}\"\n\
         Based on the following content:\n\
         <content>\n{content}\n</content>"
    )
}
