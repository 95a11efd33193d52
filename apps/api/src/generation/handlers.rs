//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::MaybeAuthUser;
use crate::errors::AppError;
use crate::generation::prompts::PROMPT_TEMPLATE_VERSION;
use crate::generation::service::{generate_post, GenerateResponse, GenerationRequest};
use crate::llm_client::{ModelInfo, MODEL};
use crate::preferences::RawPreferences;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelCatalogResponse {
    pub active_model: &'static str,
    pub models: Vec<ModelInfo>,
}

/// POST /api/v1/generate
///
/// Validates the Preference Set, generates a post and returns it.
/// For signed-in callers the post is also saved to history, after the fact.
pub async fn handle_generate(
    State(state): State<AppState>,
    MaybeAuthUser(session): MaybeAuthUser,
    Json(input): Json<RawPreferences>,
) -> Result<Json<GenerateResponse>, AppError> {
    let preferences = input.validate()?;

    let request = GenerationRequest {
        preferences,
        user_id: session.map(|s| s.user_id),
    };

    let generated = generate_post(&state.llm, state.posts.clone(), request).await?;

    Ok(Json(GenerateResponse {
        output: generated.output,
        prompt_version: PROMPT_TEMPLATE_VERSION,
    }))
}

/// GET /api/v1/models
///
/// Diagnostic probe: lists the models the configured API key can use.
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ModelCatalogResponse>, AppError> {
    let models = state.llm.list_models().await?;
    Ok(Json(ModelCatalogResponse {
        active_model: MODEL,
        models,
    }))
}
