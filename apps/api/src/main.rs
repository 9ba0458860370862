mod captions;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::captions::generator::LlmCaptionService;
use crate::captions::mock::MockCaptionService;
use crate::captions::service::CaptionService;
use crate::captions::store::SessionStore;
use crate::config::{Backend, Config};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Caption API v{}", env!("CARGO_PKG_VERSION"));

    let captions = build_caption_service(&config)?;
    info!("Caption backend: {}", captions.backend_name());

    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    sessions.spawn_sweeper(Duration::from_secs(config.session_sweep_secs));

    let state = AppState { captions, sessions };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the caption backend named by CAPTION_BACKEND.
fn build_caption_service(config: &Config) -> Result<Arc<dyn CaptionService>> {
    match config.backend {
        Backend::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .context("OPENAI_API_KEY is required for the openai backend")?;
            let llm = LlmClient::new(
                api_key,
                &config.openai_base_url,
                config.openai_model.clone(),
            )?;
            info!(
                "LLM client initialized (model: {}, endpoint: {})",
                llm.model(),
                config.openai_base_url
            );
            Ok(Arc::new(LlmCaptionService(llm)))
        }
        Backend::Mock => {
            info!("Using mock caption backend ({}ms delay)", config.mock_delay_ms);
            Ok(Arc::new(MockCaptionService::new(Duration::from_millis(
                config.mock_delay_ms,
            ))))
        }
    }
}
