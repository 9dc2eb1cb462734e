//! Chat provider trait and the NIM implementation.

use async_trait::async_trait;
use reqwest::Client;

use super::error::LlmError;
use super::types::{ChatRequest, ChatResponse};

/// Trait for chat-completion backends.
///
/// The relay handlers only see this trait, so tests can substitute a mock.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Make a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;
}

/// NVIDIA NIM provider, speaking the OpenAI-compatible completion API.
pub struct NimProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NimProvider {
    /// Construction requires a credential; a relay without one never builds
    /// a provider and rejects chat calls at the handler instead.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl ChatProvider for NimProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
