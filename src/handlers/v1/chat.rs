//! Chat relay HTTP handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::{ChatRequest, Message, Role};
use crate::response::ApiError;
use crate::server::AppState;

/// Fixed generation parameters for every upstream call.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;
const MAX_TOKENS: u32 = 8192;

/// Reply substituted when the provider returns no choices.
const EMPTY_COMPLETION_FALLBACK: &str = "Sorry, I could not generate a response.";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatApiRequest {
    message: String,
    /// Prior turns, oldest first. Forwarded upstream in order, unchanged.
    #[serde(default)]
    history: Option<Vec<Message>>,
    /// Defaults to the catalog's default model when absent.
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatApiResponse {
    response: String,
}

// ============================================================================
// Handler
// ============================================================================

/// POST /api/v1/chat
///
/// Forwards `history + [user message]` to the upstream provider and relays
/// the first completion's text. One independent upstream request per call; a
/// retransmitted turn is a new request.
pub async fn relay_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatApiRequest>,
) -> Result<Json<ChatApiResponse>, ApiError> {
    if req.message.is_empty() {
        return Err(ApiError::Validation("Message is required".to_string()));
    }

    let Some(provider) = state.provider.clone() else {
        return Err(ApiError::Configuration(
            "NVIDIA_API_KEY not configured".to_string(),
        ));
    };

    let model = req.model.unwrap_or_else(|| state.default_model.clone());

    let mut messages = req.history.unwrap_or_default();
    messages.push(Message {
        role: Role::User,
        content: req.message,
    });

    let chat_request = ChatRequest {
        model: model.clone(),
        messages,
        temperature: Some(TEMPERATURE),
        top_p: Some(TOP_P),
        max_tokens: Some(MAX_TOKENS),
        stream: false,
    };

    let chat_response = provider.chat(chat_request).await.map_err(|e| {
        warn!(model = %model, error = %e, "upstream chat call failed");
        ApiError::Upstream {
            details: e.to_string(),
        }
    })?;

    if let Some(usage) = &chat_response.usage {
        info!(
            model = %model,
            total_tokens = usage.total_tokens,
            "chat completed"
        );
    }

    let content = chat_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string());

    Ok(Json(ChatApiResponse { response: content }))
}
