// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use examcraft::config::Config;
use examcraft::routes;
use examcraft::services::GeminiClient;
use examcraft::state::{AppState, SharedGenerator};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if config.gemini_api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will be rejected by the service");
    }
    tracing::info!(model = %config.gemini_model, base = %config.gemini_api_base, "using Gemini");

    let generator: SharedGenerator = Arc::new(GeminiClient::new(&config, reqwest::Client::new()));
    let state = AppState::new(config.clone(), generator);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
