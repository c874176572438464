use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use promptforge_providers::{ProviderError, ProviderKind};

use super::{AppState, MessageBody};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModelsRequest {
    #[serde(default = "default_llm_option")]
    pub llm_option: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_llm_option() -> String {
    "ollama".to_string()
}

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub message: String,
}

// The legacy uses snake_case for this one endpoint.
#[derive(Debug, Deserialize)]
pub struct TestOpenAiRequest {
    #[serde(default)]
    pub api_key: String,
}

pub async fn get_models(
    State(state): State<AppState>,
    Json(req): Json<GetModelsRequest>,
) -> Result<Json<ModelsResponse>, (StatusCode, Json<ModelsResponse>)> {
    let kind: ProviderKind = req.llm_option.parse().map_err(|e: String| {
        (
            StatusCode::BAD_REQUEST,
            Json(ModelsResponse {
                models: vec![],
                message: e,
            }),
        )
    })?;

    let provider = state.providers.provider(kind, Some(&req.api_key));
    let response = match provider.list_models().await {
        Ok(models) => ModelsResponse {
            models,
            message: "Connection successful".to_string(),
        },
        Err(e) => {
            warn!("Model listing failed: {}", e);
            ModelsResponse {
                models: vec![],
                message: e.to_string(),
            }
        }
    };

    Ok(Json(response))
}

pub async fn test_ollama(State(state): State<AppState>) -> Json<MessageBody> {
    let provider = state.providers.provider(ProviderKind::Ollama, None);
    let message = match provider.healthcheck().await {
        Ok(()) => "Ollama connection successful".to_string(),
        Err(e) => format!("Test failed: {}", e),
    };

    Json(MessageBody { message })
}

pub async fn test_openai(
    State(state): State<AppState>,
    Json(req): Json<TestOpenAiRequest>,
) -> Json<MessageBody> {
    let provider = state
        .providers
        .provider(ProviderKind::OpenAi, Some(&req.api_key));
    let message = match provider.healthcheck().await {
        Ok(()) => "OpenAI connection successful".to_string(),
        Err(e @ ProviderError::MissingApiKey { .. }) => e.to_string(),
        Err(e) => format!("Test failed: {}", e),
    };

    Json(MessageBody { message })
}
