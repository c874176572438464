use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use promptforge_db::AiConfigRecord;

use super::prompts::storage_error;
use super::{AppState, MessageBody};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAiConfigRequest {
    #[serde(default = "default_llm_option")]
    pub llm_option: String,
    #[serde(default = "default_model")]
    pub model: String,
    // Stored as-is; a hosted config with a blank key is rejected at
    // generation time, not here.
    #[serde(default)]
    pub api_key: String,
}

fn default_llm_option() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "default".to_string()
}

#[derive(Serialize)]
pub struct AiConfigsResponse {
    pub configs: Vec<AiConfigRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAiConfigRequest {
    pub id: Option<i64>,
}

pub async fn save_ai_config(
    State(state): State<AppState>,
    Json(req): Json<SaveAiConfigRequest>,
) -> Result<Json<MessageBody>, (StatusCode, Json<MessageBody>)> {
    state
        .db
        .ai_configs()
        .insert(&req.llm_option, &req.model, &req.api_key)
        .map_err(storage_error)?;

    Ok(Json(MessageBody {
        message: "AI config saved".to_string(),
    }))
}

pub async fn list_ai_configs(
    State(state): State<AppState>,
) -> Result<Json<AiConfigsResponse>, (StatusCode, Json<MessageBody>)> {
    let configs = state.db.ai_configs().list().map_err(storage_error)?;
    Ok(Json(AiConfigsResponse { configs }))
}

pub async fn delete_ai_config(
    State(state): State<AppState>,
    Json(req): Json<DeleteAiConfigRequest>,
) -> Result<Json<MessageBody>, (StatusCode, Json<MessageBody>)> {
    let Some(id) = req.id else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageBody {
                message: "Config ID is required".to_string(),
            }),
        ));
    };

    state.db.ai_configs().delete(id).map_err(storage_error)?;

    Ok(Json(MessageBody {
        message: "AI config deleted successfully".to_string(),
    }))
}
