//! The chat route.
//!
//! Accepts a free-text message, splits it into URL and query, scrapes the
//! page through the cache, and asks the completions API to answer the
//! query from the scraped content.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use pagetalk_core::ScrapedContent;

use crate::error::ApiError;
use crate::parse::parse_message;
use crate::state::AppState;

/// Shown when the scrape produced no usable text; the model is still
/// asked, so the user gets an answer explaining the situation.
const NO_CONTENT_FALLBACK: &str = "No content available";

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub result: String,
}

/// `POST /api/chat`
///
/// Input guards answer with HTTP 200 and a guidance message rather than
/// an error status, so chat front-ends can render them inline.
pub async fn chat_handler(
    State(state): State<AppState>, Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError> {
    let (url, query) = parse_message(&body.message);

    let url = match (url, query.is_empty()) {
        (None, true) => {
            return Ok(guidance("Both URL and query are missing. Please write both of them."));
        }
        (None, false) => {
            tracing::warn!("no URL found in message");
            return Ok(guidance("URL is missing. Please add a url."));
        }
        (Some(_), true) => {
            tracing::warn!("no query found in message");
            return Ok(guidance("Query is missing. Please add a query."));
        }
        (Some(url), false) => url,
    };

    let completions = state
        .completions
        .as_ref()
        .ok_or_else(|| ApiError::Misconfigured("completions API key not configured".to_string()))?;

    let scraped = state.scraper.fetch_and_extract(&url).await;
    if let Some(err) = &scraped.error {
        tracing::warn!(%url, %err, "scrape failed, answering without page content");
    }

    let answer = completions.answer_about_page(&query, page_content(&scraped)).await?;

    tracing::debug!(%url, "chat request answered");
    Ok(Json(ChatReply { result: answer }))
}

/// Content to hand the model: the scraped text, or the fallback when the
/// scrape failed or the page had nothing extractable.
fn page_content(scraped: &ScrapedContent) -> &str {
    scraped.content.as_deref().filter(|c| !c.is_empty()).unwrap_or(NO_CONTENT_FALLBACK)
}

fn guidance(message: &str) -> Json<ChatReply> {
    tracing::warn!(%message, "rejecting incomplete chat message");
    Json(ChatReply { result: message.to_string() })
}
