use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a model provider.
///
/// These replace the legacy convention of returning error text through the
/// completion channel. The HTTP boundary decides how each variant is
/// rendered on the wire.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request timed out ({limit})")]
    Timeout {
        provider: ProviderKind,
        limit: &'static str,
    },

    #[error("{provider} connection failed - {detail}")]
    Connection { provider: ProviderKind, detail: String },

    #[error("{provider} API error: {detail}")]
    Api { provider: ProviderKind, detail: String },

    #[error("{provider} returned an unexpected response: {detail}")]
    InvalidResponse { provider: ProviderKind, detail: String },

    #[error("Invalid or missing API key")]
    MissingApiKey { provider: ProviderKind },
}

/// Supported provider backends.
///
/// A closed enum rather than a string: new providers are added as variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Ollama,
    OpenAi,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Ollama => write!(f, "Ollama"),
            ProviderKind::OpenAi => write!(f, "OpenAI"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" | "open-ai" | "chatgpt" => Ok(ProviderKind::OpenAi),
            _ => Err(format!("Unknown provider type: {}", s)),
        }
    }
}

/// The core abstraction over model provider backends.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Which backend this provider talks to.
    fn kind(&self) -> ProviderKind;

    /// List the model names available from this backend.
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;

    /// Request a completion for the rendered prompt from the given model.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Probe the backend for reachability.
    async fn healthcheck(&self) -> Result<(), ProviderError> {
        self.list_models().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("ollama".parse::<ProviderKind>(), Ok(ProviderKind::Ollama));
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!("chatgpt".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert!("claude".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::Timeout {
            provider: ProviderKind::Ollama,
            limit: "5m",
        };
        assert_eq!(err.to_string(), "Ollama request timed out (5m)");

        let err = ProviderError::Connection {
            provider: ProviderKind::Ollama,
            detail: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Ollama connection failed - connection refused"
        );

        let err = ProviderError::MissingApiKey {
            provider: ProviderKind::OpenAi,
        };
        assert_eq!(err.to_string(), "Invalid or missing API key");
    }
}
