//! Upstream call error types.

use std::fmt;

/// Errors that can occur when calling the upstream chat-completion API.
#[derive(Debug)]
pub enum LlmError {
    /// HTTP request failed before a response was received
    Request(reqwest::Error),
    /// Upstream returned a non-success response
    Api { status: u16, message: String },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Request(e) => write!(f, "HTTP request failed: {e}"),
            LlmError::Api { status, message } => {
                write!(f, "API error (status {status}): {message}")
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Request(err)
    }
}
