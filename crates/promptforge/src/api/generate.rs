use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use promptforge_providers::{ProviderError, ProviderKind};
use promptforge_template::{PromptFields, PromptTemplate};

use super::{AppState, ErrorBody};

/// Request body for POST /generate.
///
/// Defaults match the legacy wire contract for absent optional fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub task: String,
    #[serde(default = "default_example")]
    pub example: String,
    #[serde(default = "default_reasoning")]
    pub reasoning: String,
    #[serde(default = "default_external_source")]
    pub external_source: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    #[serde(default = "default_prompt_format")]
    pub prompt_format: String,
    #[serde(default = "default_llm_option")]
    pub llm_option: String,
    #[serde(default = "default_model")]
    pub selected_model: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_example() -> String {
    "no example".to_string()
}

fn default_reasoning() -> String {
    "step-by-step thinking".to_string()
}

fn default_external_source() -> String {
    "no".to_string()
}

fn default_output_format() -> String {
    "text".to_string()
}

fn default_prompt_format() -> String {
    "instruction".to_string()
}

fn default_llm_option() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "default".to_string()
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
}

pub async fn generate_prompt(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorBody>)> {
    if req.role.trim().is_empty() || req.task.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Role and task are required".to_string(),
            }),
        ));
    }

    let kind: ProviderKind = req
        .llm_option
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, Json(ErrorBody { error: e })))?;

    let rendered = PromptTemplate::render(&PromptFields {
        role: &req.role,
        task: &req.task,
        example: &req.example,
        reasoning: &req.reasoning,
        external_source: &req.external_source,
        output_format: &req.output_format,
        prompt_format: &req.prompt_format,
    });

    let provider = state.providers.provider(kind, Some(&req.api_key));
    let refined = provider
        .generate(&req.selected_model, &rendered)
        .await
        .map_err(|e| {
            error!("Prompt generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: wire_error(&e) }),
            )
        })?;

    Ok(Json(GenerateResponse { prompt: refined }))
}

/// Render a provider failure in the legacy wire format: a string starting
/// with "Error". Constructed only here, at the HTTP boundary.
fn wire_error(err: &ProviderError) -> String {
    match err {
        ProviderError::MissingApiKey { provider } => {
            format!("Error: Please provide a valid {} API key", provider)
        }
        _ => format!("Error: {}", err),
    }
}
