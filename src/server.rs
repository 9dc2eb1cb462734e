use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::handlers;
use crate::llm::{ChatProvider, NimProvider};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Built only when a credential is configured; `None` turns every chat
    /// call into a configuration error.
    pub provider: Option<Arc<dyn ChatProvider>>,
    pub default_model: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let provider = config.api_key.as_ref().map(|key| {
            Arc::new(NimProvider::new(
                config.upstream_base_url.clone(),
                key.clone(),
            )) as Arc<dyn ChatProvider>
        });

        Self {
            provider,
            default_model: crate::catalog::DEFAULT_MODEL.to_string(),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/chat", post(handlers::v1::relay_chat))
        .route("/models", get(handlers::v1::list_models))
        .with_state(state);

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .nest("/api/v1", api_v1)
        .layer(CorsLayer::permissive())
}
