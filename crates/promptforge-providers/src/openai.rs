//! Hosted OpenAI backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

use crate::traits::{ModelProvider, ProviderError, ProviderKind};

const LIST_TIMEOUT: Duration = Duration::from_secs(10);
const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You are an expert prompt engineer.";

/// Model used for the one-token healthcheck completion.
const HEALTHCHECK_MODEL: &str = "gpt-3.5-turbo";

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// A blank or whitespace key is rejected before any network call.
    fn require_key(&self) -> Result<&str, ProviderError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            Err(ProviderError::MissingApiKey {
                provider: ProviderKind::OpenAi,
            })
        } else {
            Ok(key)
        }
    }

    /// Loggable key prefix. Never log the full credential.
    fn key_prefix(&self) -> String {
        self.api_key.chars().take(5).collect()
    }

    fn transport_error(err: reqwest::Error, limit: &'static str) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider: ProviderKind::OpenAi,
                limit,
            }
        } else {
            ProviderError::Connection {
                provider: ProviderKind::OpenAi,
                detail: err.to_string(),
            }
        }
    }

    async fn chat_completion(&self, request: Value) -> Result<Value, ProviderError> {
        let key = self.require_key()?;
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&request)
            .timeout(CHAT_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                let err = Self::transport_error(e, "30s");
                error!("OpenAI chat request failed: {}", err);
                err
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("OpenAI chat request rejected: HTTP {}: {}", status, body);
            return Err(ProviderError::Api {
                provider: ProviderKind::OpenAi,
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        response.json().await.map_err(|e| {
            let err = ProviderError::InvalidResponse {
                provider: ProviderKind::OpenAi,
                detail: e.to_string(),
            };
            error!("OpenAI chat response decode failed: {}", err);
            err
        })
    }
}

/// Extract model identifiers from a `/models` response body.
///
/// Entries without a string id are skipped.
fn parse_models_response(body: &Value) -> Vec<String> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Extract the trimmed completion text from a chat completion body.
fn parse_chat_response(body: &Value) -> Result<String, ProviderError> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ProviderError::InvalidResponse {
            provider: ProviderKind::OpenAi,
            detail: "missing choices[0].message.content".to_string(),
        })
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let key = self.require_key()?;
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(key)
            .timeout(LIST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                let err = Self::transport_error(e, "10s");
                error!("OpenAI model listing failed: {}", err);
                err
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("OpenAI model listing rejected: HTTP {}: {}", status, body);
            return Err(ProviderError::Api {
                provider: ProviderKind::OpenAi,
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            let err = ProviderError::InvalidResponse {
                provider: ProviderKind::OpenAi,
                detail: e.to_string(),
            };
            error!("OpenAI model listing decode failed: {}", err);
            err
        })?;

        Ok(parse_models_response(&body))
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        debug!("Generating prompt with API key: {}...", self.key_prefix());

        let request = json!({
            "model": model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ]
        });

        let body = self.chat_completion(request).await?;
        parse_chat_response(&body).map_err(|e| {
            error!("OpenAI chat response malformed: {}", e);
            e
        })
    }

    /// Verify the key can both list models and generate content.
    async fn healthcheck(&self) -> Result<(), ProviderError> {
        self.list_models().await?;

        let request = json!({
            "model": HEALTHCHECK_MODEL,
            "messages": [{"role": "user", "content": "Test message"}],
            "max_tokens": 1
        });
        self.chat_completion(request).await.map(|_| ())
    }
}
