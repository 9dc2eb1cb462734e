//! Model catalog HTTP handler.

use axum::Json;
use serde::Serialize;

use crate::catalog::{self, ModelDescriptor};

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    models: Vec<ModelDescriptor>,
}

/// GET /api/v1/models
///
/// Returns the hardcoded catalog. No external call; always succeeds.
pub async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: catalog::builtin_models(),
    })
}
