//! Profile defaults: the preferences used to pre-fill every new generation.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::preferences::options::{Audience, Gender, Goal, Length, Speaker, Tone};
use crate::preferences::{parse_language, parse_required, Preferences, DEFAULT_POST_TYPE};
use crate::state::AppState;

/// Request body for saving defaults. Every field except `default_post_type` is required:
/// the store overwrites the whole row, so partial updates would silently reset fields.
#[derive(Debug, Deserialize)]
pub struct ProfileInput {
    pub default_language: Option<String>,
    pub default_post_type: Option<String>,
    pub default_goal: Option<String>,
    pub default_speaker: Option<String>,
    pub default_gender: Option<String>,
    pub default_audience: Option<String>,
    pub default_tone: Option<String>,
    pub default_length: Option<String>,
}

impl ProfileInput {
    pub fn into_preferences(self) -> Result<Preferences, AppError> {
        Ok(Preferences {
            language: parse_language(self.default_language.as_deref())?,
            post_type: self
                .default_post_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_POST_TYPE.to_string()),
            goal: parse_required::<Goal>(self.default_goal.as_deref())?,
            speaker: parse_required::<Speaker>(self.default_speaker.as_deref())?,
            gender: parse_required::<Gender>(self.default_gender.as_deref())?,
            audience: parse_required::<Audience>(self.default_audience.as_deref())?,
            tone: parse_required::<Tone>(self.default_tone.as_deref())?,
            length: parse_required::<Length>(self.default_length.as_deref())?,
        })
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> Result<Json<ProfileRow>, AppError> {
    state
        .profiles
        .get_profile(session.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No saved preferences yet".to_string()))
}

/// PUT /api/v1/profile
///
/// Creates or overwrites the caller's defaults.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Json(input): Json<ProfileInput>,
) -> Result<Json<ProfileRow>, AppError> {
    let defaults = input.into_preferences()?;
    let row = state
        .profiles
        .upsert_profile(session.user_id, &defaults)
        .await?;
    Ok(Json(row))
}
