//! Examforge server binary
//!
//! Run with: cargo run -p examforge --bin examforge-server

use examforge::{config::ExamForgeConfig, server::ExamForgeServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "examforge=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: EXAMFORGE_CONFIG points at a TOML file, otherwise
    // defaults plus env-var API keys
    let config = match std::env::var("EXAMFORGE_CONFIG") {
        Ok(path) => ExamForgeConfig::from_file(&path)?,
        Err(_) => ExamForgeConfig::from_env(),
    };

    tracing::info!("configuration loaded");
    tracing::info!("  - primary engine: gemini ({})", config.engines.gemini.model);
    tracing::info!(
        "  - secondary engine: huggingface ({})",
        config.engines.huggingface.model
    );
    tracing::info!("  - engine timeout: {}s", config.engines.timeout_secs);

    if config.engines.gemini.api_key.is_empty() {
        tracing::warn!("EXAMFORGE_GEMINI_API_KEY is not set; primary engine calls will fail");
    }
    if config.engines.huggingface.api_key.is_empty() {
        tracing::warn!("EXAMFORGE_HF_API_KEY is not set; secondary engine calls will fail");
    }

    let server = ExamForgeServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/materials  - Upload documents");
    println!("  POST /api/generate   - Generate question sets");
    println!("  GET  /api/questions  - List generated sets");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
