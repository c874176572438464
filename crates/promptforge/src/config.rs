//! Service configuration.
//!
//! Optional settings come from `promptforge.toml`; CLI flags take
//! precedence over the file, and built-in defaults fill the rest. The
//! resolved [`AppConfig`] is passed explicitly to the store and the
//! provider registry at construction.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PATH: &str = "prompts.db";

/// Settings loaded from `promptforge.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Port for the HTTP API
    pub port: Option<u16>,
    /// Path to the SQLite database
    pub db_path: Option<PathBuf>,
    /// Local Ollama backend
    #[serde(default)]
    pub ollama: BackendConfig,
    /// Hosted OpenAI backend
    #[serde(default)]
    pub openai: BackendConfig,
}

/// Per-backend settings.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL for the backend's API
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load configuration from the given path.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses successfully
    /// - `Ok(None)` if the file does not exist
    /// - `Err(...)` if the file exists but fails to parse (hard error)
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub ollama_url: String,
    pub openai_url: String,
}

impl AppConfig {
    /// Merge CLI flags over file settings over defaults.
    pub fn resolve(
        file: Option<FileConfig>,
        port: Option<u16>,
        db_path: Option<PathBuf>,
        ollama_url: Option<String>,
        openai_url: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = promptforge_providers::ProviderSettings::default();

        Self {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            db_path: db_path
                .or(file.db_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            ollama_url: ollama_url
                .or(file.ollama.base_url)
                .unwrap_or(defaults.ollama_url),
            openai_url: openai_url
                .or(file.openai.base_url)
                .unwrap_or(defaults.openai_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(None, None, None, None, None);
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_path, PathBuf::from("prompts.db"));
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.openai_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            port = 8080
            db_path = "data/forge.db"

            [ollama]
            base_url = "http://ollama.internal:11434"
            "#,
        )
        .unwrap();

        let config = AppConfig::resolve(Some(file), Some(9999), None, None, None);
        assert_eq!(config.port, 9999);
        assert_eq!(config.db_path, PathBuf::from("data/forge.db"));
        assert_eq!(config.ollama_url, "http://ollama.internal:11434");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str("bind = \"0.0.0.0\"");
        assert!(result.is_err());
    }
}
