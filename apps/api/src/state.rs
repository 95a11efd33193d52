use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::persistence::{PostStore, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client in here is built once in `main` and only ever cloned by handle.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Generated-post history. Default: `PgStore`.
    pub posts: Arc<dyn PostStore>,
    /// Saved preference defaults. Default: the same `PgStore`.
    pub profiles: Arc<dyn ProfileStore>,
    pub config: Config,
}
