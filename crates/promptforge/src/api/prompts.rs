use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use promptforge_db::SavedPrompt;

use super::{AppState, MessageBody};

#[derive(Debug, Deserialize)]
pub struct SavePromptRequest {
    // Lenient by design: an absent prompt is stored as an empty string.
    #[serde(default)]
    pub prompt: String,
}

#[derive(Serialize)]
pub struct SavedPromptsResponse {
    pub prompts: Vec<SavedPrompt>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePromptRequest {
    pub id: Option<i64>,
}

pub async fn save_prompt(
    State(state): State<AppState>,
    Json(req): Json<SavePromptRequest>,
) -> Result<Json<MessageBody>, (StatusCode, Json<MessageBody>)> {
    state
        .db
        .prompts()
        .insert(&req.prompt)
        .map_err(storage_error)?;

    Ok(Json(MessageBody {
        message: "Prompt saved successfully".to_string(),
    }))
}

pub async fn list_saved_prompts(
    State(state): State<AppState>,
) -> Result<Json<SavedPromptsResponse>, (StatusCode, Json<MessageBody>)> {
    let prompts = state.db.prompts().list().map_err(storage_error)?;
    Ok(Json(SavedPromptsResponse { prompts }))
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Json(req): Json<DeletePromptRequest>,
) -> Result<Json<MessageBody>, (StatusCode, Json<MessageBody>)> {
    let Some(id) = req.id else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageBody {
                message: "Prompt ID is required".to_string(),
            }),
        ));
    };

    // Deleting a nonexistent id is a no-op, not an error
    state.db.prompts().delete(id).map_err(storage_error)?;

    Ok(Json(MessageBody {
        message: "Prompt deleted successfully".to_string(),
    }))
}

pub(super) fn storage_error(err: impl std::fmt::Display) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageBody {
            message: err.to_string(),
        }),
    )
}
