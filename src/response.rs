//! API error taxonomy and its JSON wire mapping.
//!
//! Every failure surfaces as `{ "error": "...", "details": "..."? }` with a
//! status code matching the error class. Nothing is retried; all errors are
//! terminal for the current turn.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Relay-side error classes.
#[derive(Debug)]
pub enum ApiError {
    /// Required input missing or malformed (400).
    Validation(String),
    /// The relay has no provider credential (500).
    Configuration(String),
    /// The upstream provider call failed; its detail is forwarded verbatim
    /// (500).
    Upstream { details: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::Configuration(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::Upstream { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Failed to communicate with upstream API".to_string(),
                    details: Some(details),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_omits_details() {
        let body = ErrorBody {
            error: "Message is required".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Message is required"}"#);
    }

    #[test]
    fn test_upstream_maps_to_500_with_details() {
        let response = ApiError::Upstream {
            details: "API error (status 401): invalid key".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = ApiError::Validation("Message is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
