mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod history;
mod llm_client;
mod models;
mod persistence;
mod preferences;
mod profile;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::persistence::postgres::PgStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing required env vars
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Postry API v{}", env!("CARGO_PKG_VERSION"));

    let pool = create_pool(&config.database_url, DB_MAX_CONNECTIONS).await?;
    let store = Arc::new(PgStore::new(pool));

    let llm = LlmClient::new(
        config.google_api_key.clone(),
        config.gemini_api_base.clone(),
        Duration::from_secs(config.generation_timeout_secs),
        config.generation_max_attempts,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, attempts: {})",
        llm_client::MODEL,
        config.generation_timeout_secs,
        config.generation_max_attempts
    );

    let state = AppState {
        llm,
        posts: store.clone(),
        profiles: store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

const DB_MAX_CONNECTIONS: u32 = 10;
