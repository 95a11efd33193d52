//! Shared helpers for unit tests: a local stand-in for the Gemini API and a ready-made `AppState`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use serde_json::{json, Value};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::persistence::memory::MemoryStore;
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-with-enough-entropy-0123456789";

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A successful `generateContent` body carrying `text`.
pub fn gemini_text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 80 }
    })
}

pub fn test_config(gemini_api_base: &str) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        google_api_key: "test-key".to_string(),
        gemini_api_base: gemini_api_base.to_string(),
        supabase_jwt_secret: TEST_JWT_SECRET.to_string(),
        generation_timeout_secs: 2,
        generation_max_attempts: 1,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_llm(base: &str, timeout: Duration) -> LlmClient {
    LlmClient::new("test-key".to_string(), base.to_string(), timeout, 1).unwrap()
}

/// Builds an `AppState` over an in-memory store and an LLM client aimed at `gemini_api_base`.
pub fn test_state(gemini_api_base: &str, store: Arc<MemoryStore>) -> AppState {
    let config = test_config(gemini_api_base);
    AppState {
        llm: test_llm(
            gemini_api_base,
            Duration::from_secs(config.generation_timeout_secs),
        ),
        posts: store.clone(),
        profiles: store,
        config,
    }
}
