use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::warn;

use crate::auth::MaybeAuthUser;
use crate::errors::AppError;
use crate::generation::service::generate_post;
use crate::state::AppState;
use crate::wizard::machine::{Effect, WizardController, WizardError, WizardEvent, WizardSnapshot};

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Events a client may send. Generation outcomes are produced server-side only.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientEvent {
    Next,
    Back,
    Submit,
    StartOver,
    OpenAuth,
    CloseAuth,
}

impl From<ClientEvent> for WizardEvent {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::Next => WizardEvent::Next,
            ClientEvent::Back => WizardEvent::Back,
            ClientEvent::Submit => WizardEvent::Submit,
            ClientEvent::StartOver => WizardEvent::StartOver,
            ClientEvent::OpenAuth => WizardEvent::OpenAuth,
            ClientEvent::CloseAuth => WizardEvent::CloseAuth,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WizardEventRequest {
    pub snapshot: WizardSnapshot,
    pub event: ClientEvent,
}

/// GET /api/v1/wizard/entry
///
/// Initial wizard state for the caller. Signed-in users with saved defaults land on
/// the Content step with the form pre-filled.
pub async fn handle_wizard_entry(
    State(state): State<AppState>,
    MaybeAuthUser(session): MaybeAuthUser,
) -> Result<Json<WizardSnapshot>, AppError> {
    let profile = match &session {
        Some(s) => state.profiles.get_profile(s.user_id).await?,
        None => None,
    };

    let wizard = WizardController::enter(session.as_ref(), profile.as_ref());
    Ok(Json(wizard.snapshot()))
}

/// POST /api/v1/wizard/events
///
/// Applies one event to the client's snapshot and returns the next one. A submit runs
/// the generation inline, so the response is already at the result (or back at the
/// form with a notice) and never in the generating view.
pub async fn handle_wizard_event(
    State(state): State<AppState>,
    MaybeAuthUser(session): MaybeAuthUser,
    Json(input): Json<WizardEventRequest>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let mut wizard = WizardController::restore(input.snapshot, session.as_ref());

    if let Effect::Generate(request) = wizard.handle(input.event.into())? {
        let outcome = match generate_post(&state.llm, state.posts.clone(), request).await {
            Ok(generated) => WizardEvent::GenerationSucceeded(generated.output),
            Err(e) => {
                warn!("Wizard generation failed, returning to form: {e}");
                WizardEvent::GenerationFailed
            }
        };
        wizard.handle(outcome)?;
    }

    Ok(Json(wizard.snapshot()))
}
