mod config;
mod db;
mod errors;
mod evaluation;
mod llm_gateway;
mod routes;
mod rules;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_gateway::{LlmGateway, OpenAiGateway};
use crate::routes::build_router;
use crate::rules::store::{ConfigStore, PgConfigStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails startup on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the rule-config store
    let pool = create_pool(&config.database_url).await?;
    let config_store: Arc<dyn ConfigStore> = Arc::new(PgConfigStore::new(pool));

    // Initialize the LLM gateway client
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiGateway::new(
        config.openai_api_key.clone(),
        config.gateway_url.clone(),
    ));
    info!("LLM gateway client initialized (model: {})", llm_gateway::MODEL);

    let state = AppState {
        gateway,
        config_store,
    };

    // The trainee UI is served from another origin; all origins are allowed.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
