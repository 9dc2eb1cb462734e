//! HTTP client for the relay API.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::catalog::ModelDescriptor;
use crate::llm::Message;
use crate::response::ErrorBody;

/// Client for the relay's `/api/v1` surface.
pub struct RelayClient {
    http: Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatCall<'a> {
    message: &'a str,
    history: &'a [Message],
    model: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Deserialize)]
struct ModelsReply {
    models: Vec<ModelDescriptor>,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Submit one turn. No timeout is set; a hung relay stalls this call
    /// until the transport gives up.
    pub async fn send_chat(
        &self,
        message: &str,
        history: &[Message],
        model: &str,
    ) -> Result<String, RelayError> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&ChatCall {
                message,
                history,
                model,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.bytes().await.unwrap_or_default();
            return Err(decode_error(status, &body));
        }

        let reply: ChatReply = response.json().await?;
        Ok(reply.response)
    }

    /// Fetch the model catalog.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, RelayError> {
        let url = format!("{}/models", self.base_url);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.bytes().await.unwrap_or_default();
            return Err(decode_error(status, &body));
        }

        let reply: ModelsReply = response.json().await?;
        Ok(reply.models)
    }
}

/// Map a non-success relay response to a `RelayError`, preserving the
/// `{error, details?}` body when it parses.
fn decode_error(status: u16, body: &[u8]) -> RelayError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => RelayError::Api {
            status,
            error: parsed.error,
            details: parsed.details,
        },
        Err(_) => RelayError::Api {
            status,
            error: "Failed to send message".to_string(),
            details: None,
        },
    }
}

// ============================================================================
// RelayError
// ============================================================================

/// Errors surfaced by the relay client.
#[derive(Debug)]
pub enum RelayError {
    /// Transport failure before a response was decoded
    Http(reqwest::Error),
    /// The relay answered with an error body
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Http(e) => write!(f, "HTTP request failed: {e}"),
            RelayError::Api { error, details, .. } => {
                write!(f, "{error}")?;
                if let Some(details) = details {
                    write!(f, ": {details}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_with_details() {
        let body = br#"{"error":"Failed to communicate with upstream API","details":"API error (status 401): bad key"}"#;
        let err = decode_error(500, body);
        assert_eq!(
            err.to_string(),
            "Failed to communicate with upstream API: API error (status 401): bad key"
        );
    }

    #[test]
    fn test_decode_error_without_details() {
        let body = br#"{"error":"NVIDIA_API_KEY not configured"}"#;
        let err = decode_error(500, body);
        assert_eq!(err.to_string(), "NVIDIA_API_KEY not configured");
    }

    #[test]
    fn test_decode_error_unparseable_body() {
        let err = decode_error(502, b"<html>bad gateway</html>");
        match err {
            RelayError::Api {
                status,
                error,
                details,
            } => {
                assert_eq!(status, 502);
                assert_eq!(error, "Failed to send message");
                assert!(details.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = RelayClient::new("http://localhost:3002/api/v1/");
        assert_eq!(client.base_url, "http://localhost:3002/api/v1");
    }
}
