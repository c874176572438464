//! # promptforge-providers
//!
//! Uniform gateway over the two model provider backends: a local Ollama
//! server and the hosted OpenAI API.
//!
//! ## Key Types
//!
//! - [`ProviderKind`] - Closed enum of supported backends
//! - [`ModelProvider`] - The list-models / generate / healthcheck contract
//! - [`ProviderError`] - Typed provider failures
//! - [`ProviderRegistry`] - Per-request provider construction

mod ollama;
mod openai;
mod traits;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use traits::{ModelProvider, ProviderError, ProviderKind};

use reqwest::Client;

/// Base URLs for the provider backends.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub ollama_url: String,
    pub openai_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            openai_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Constructs providers bound to a shared HTTP client.
///
/// Credentials arrive per request, so providers are built per call rather
/// than held for the life of the process.
pub struct ProviderRegistry {
    client: Client,
    settings: ProviderSettings,
}

impl ProviderRegistry {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Create a provider by kind.
    pub fn provider(&self, kind: ProviderKind, api_key: Option<&str>) -> Box<dyn ModelProvider> {
        match kind {
            ProviderKind::Ollama => Box::new(OllamaProvider::new(
                self.client.clone(),
                self.settings.ollama_url.clone(),
            )),
            ProviderKind::OpenAi => Box::new(OpenAiProvider::new(
                self.client.clone(),
                self.settings.openai_url.clone(),
                api_key.unwrap_or_default().to_string(),
            )),
        }
    }
}
