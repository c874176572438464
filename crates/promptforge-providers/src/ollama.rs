//! Local Ollama backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

use crate::traits::{ModelProvider, ProviderError, ProviderKind};

const LIST_TIMEOUT: Duration = Duration::from_secs(10);
const CHAT_TIMEOUT: Duration = Duration::from_secs(300);

pub struct OllamaProvider {
    client: Client,
    base_url: String,
}

impl OllamaProvider {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn transport_error(err: reqwest::Error, limit: &'static str) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider: ProviderKind::Ollama,
                limit,
            }
        } else {
            ProviderError::Connection {
                provider: ProviderKind::Ollama,
                detail: err.to_string(),
            }
        }
    }
}

/// Extract model names from an `/api/tags` response body.
fn parse_tags_response(body: &Value) -> Vec<String> {
    body.get("models")
        .and_then(Value::as_array)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Extract the trimmed completion text from an `/api/chat` response body.
///
/// A missing message content field yields an empty string.
fn parse_chat_response(body: &Value) -> String {
    body.get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        debug!("Fetching Ollama models from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(LIST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Self::transport_error(e, "10s"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Ollama model listing failed: HTTP {}: {}", status, body);
            return Err(ProviderError::Api {
                provider: ProviderKind::Ollama,
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            let err = ProviderError::InvalidResponse {
                provider: ProviderKind::Ollama,
                detail: e.to_string(),
            };
            error!("Ollama model listing decode failed: {}", err);
            err
        })?;

        Ok(parse_tags_response(&body))
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
            "options": {"temperature": 0.7, "num_ctx": 2048}
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(CHAT_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                let err = Self::transport_error(e, "5m");
                error!("Ollama chat request failed: {}", err);
                err
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Ollama chat request rejected: HTTP {}: {}", status, body);
            return Err(ProviderError::Api {
                provider: ProviderKind::Ollama,
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            let err = ProviderError::InvalidResponse {
                provider: ProviderKind::Ollama,
                detail: e.to_string(),
            };
            error!("Ollama chat response decode failed: {}", err);
            err
        })?;

        Ok(parse_chat_response(&body))
    }
}
