use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use promptforge_db::Database;
use promptforge_providers::{ProviderRegistry, ProviderSettings};

use crate::config::{AppConfig, FileConfig};
use crate::logging::LogFormat;

mod api;
mod config;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "promptforge",
    about = "Prompt refinement service over local and hosted LLM providers",
    version,
    author
)]
struct Cli {
    /// Port for the HTTP API (default: 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the SQLite database (default: ./prompts.db)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Base URL of the local Ollama server
    #[arg(long)]
    ollama_url: Option<String>,

    /// Base URL of the OpenAI API
    #[arg(long)]
    openai_url: Option<String>,

    /// Path to the config file
    #[arg(long, default_value = "promptforge.toml")]
    config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(&cli.log_level, cli.log_format.into());

    let file_config = FileConfig::load(&cli.config)?;
    let config = AppConfig::resolve(
        file_config,
        cli.port,
        cli.db_path,
        cli.ollama_url,
        cli.openai_url,
    );

    let db = Arc::new(Database::open_at(&config.db_path).context("Failed to initialize database")?);
    let providers = Arc::new(ProviderRegistry::new(ProviderSettings {
        ollama_url: config.ollama_url.clone(),
        openai_url: config.openai_url.clone(),
    }));

    let router = api::create_router(db, providers);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind API server to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    eprintln!("\nShutting down...");
}
