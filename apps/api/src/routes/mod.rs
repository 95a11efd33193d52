pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::preferences::handlers as preferences;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(preferences::handle_get_options))
        // Generation
        .route("/api/v1/generate", post(generation::handle_generate))
        .route("/api/v1/models", get(generation::handle_list_models))
        // History
        .route("/api/v1/posts", get(history::handle_list_posts))
        .route("/api/v1/posts/:id", delete(history::handle_delete_post))
        // Profile defaults
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        // Wizard
        .route("/api/v1/wizard/entry", get(wizard::handle_wizard_entry))
        .route("/api/v1/wizard/events", post(wizard::handle_wizard_event))
        .with_state(state)
}
