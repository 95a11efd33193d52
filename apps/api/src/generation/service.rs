//! Post generation pipeline for one request.
//!
//! Flow: assemble prompt → single LLM call → return text →
//!       (signed-in users only) save history record in the background.
//!
//! Any upstream failure becomes `AppError::GenerationFailed` and nothing is persisted.
//! The history save never blocks or fails the response; its errors are only logged.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::assembler::assemble_prompt;
use crate::generation::prompts::PROMPT_TEMPLATE_VERSION;
use crate::llm_client::LlmClient;
use crate::persistence::PostStore;
use crate::preferences::PreferenceSet;

/// A validated Preference Set plus the caller's identity, if signed in.
/// Built fresh per call and never stored itself.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub preferences: PreferenceSet,
    pub user_id: Option<Uuid>,
}

/// Response body for a successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub output: String,
    pub prompt_version: u32,
}

/// Result of `generate_post`: the text plus the detached history-save task, if any.
pub struct GeneratedPost {
    pub output: String,
    /// Callers may drop this; it is exposed so tests can await the save.
    pub history_save: Option<JoinHandle<()>>,
}

/// Runs the generation pipeline for one request.
pub async fn generate_post(
    llm: &LlmClient,
    posts: Arc<dyn PostStore>,
    request: GenerationRequest,
) -> Result<GeneratedPost, AppError> {
    let prompt = assemble_prompt(&request.preferences);
    info!(
        "Generating post (template v{PROMPT_TEMPLATE_VERSION}, {} prompt chars, signed_in={})",
        prompt.len(),
        request.user_id.is_some()
    );

    // Logged once where the failure is rendered: AppError's IntoResponse or the wizard handler
    let output = llm.generate(&prompt).await?;

    let history_save = request
        .user_id
        .map(|user_id| spawn_history_save(posts, user_id, request.preferences, output.clone()));

    Ok(GeneratedPost {
        output,
        history_save,
    })
}

/// Saves a Generated Post Record on a detached task. Failures are logged and swallowed.
pub fn spawn_history_save(
    posts: Arc<dyn PostStore>,
    user_id: Uuid,
    preferences: PreferenceSet,
    content: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let parameters = match serde_json::to_value(&preferences) {
            Ok(v) => v,
            Err(e) => {
                error!("Could not serialize preferences for user {user_id}: {e}");
                return;
            }
        };

        if let Err(e) = posts
            .save_generated_post(user_id, &preferences.topic, &content, &parameters)
            .await
        {
            // TODO: queue failed history writes for retry instead of dropping them
            error!("Failed to save generated post for user {user_id}: {e}");
        }
    })
}
