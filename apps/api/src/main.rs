mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::service::InterviewService;
use crate::interview::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interviewer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (the only AI gateway backend)
    let llm = LlmClient::new(
        config.ai_api_url.clone(),
        config.groq_api_key.clone(),
        config.ai_model.clone(),
        config.ai_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.ai_timeout.as_secs()
    );

    info!(
        "Interview defaults: {} questions, levels {:?}, topic {}",
        config.interview.max_questions, config.interview.difficulty_levels, config.interview.topic
    );

    // In-memory sessions; idle ones are swept
    let store = SessionStore::new();
    store.spawn_eviction(config.session_ttl, SESSION_SWEEP_INTERVAL);
    info!("Session TTL: {}s", config.session_ttl.as_secs());

    // Build app state
    let interviews = InterviewService::new(
        store,
        Arc::new(llm),
        config.interview.clone(),
    );
    let state = AppState {
        interviews,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
