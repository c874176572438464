//! # HTTP API
//!
//! Wire-compatible with the legacy service: JSON bodies in, JSON bodies
//! out, with `{"error": ...}` on /generate failures and `{"message": ...}`
//! everywhere else.

mod configs;
mod generate;
mod models;
mod prompts;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use promptforge_db::Database;
use promptforge_providers::ProviderRegistry;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub providers: Arc<ProviderRegistry>,
}

/// Generic `{"message": ...}` response body.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{"error": ...}` response body used by /generate.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn create_router(db: Arc<Database>, providers: Arc<ProviderRegistry>) -> Router {
    let state = AppState { db, providers };

    Router::new()
        .route("/generate", post(generate::generate_prompt))
        .route("/save", post(prompts::save_prompt))
        .route("/saved_prompts", get(prompts::list_saved_prompts))
        .route("/delete_prompt", post(prompts::delete_prompt))
        .route("/save_ai_config", post(configs::save_ai_config))
        .route("/ai_configs", get(configs::list_ai_configs))
        .route("/delete_ai_config", post(configs::delete_ai_config))
        .route("/get_models", post(models::get_models))
        .route("/test_llama", get(models::test_ollama))
        .route("/test_chatgpt", post(models::test_openai))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
