//! Session observation for Axum handlers.
//!
//! The identity provider owns the whole session lifecycle; this module only checks
//! whether a request carries a valid bearer token and, if so, whose.

pub mod jwt;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt::validate_access_token;
use crate::errors::AppError;
use crate::state::AppState;

/// A verified session: the bearer token and the identity it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    #[allow(dead_code)]
    pub email: Option<String>,
    #[allow(dead_code)]
    pub access_token: String,
}

/// Authenticated user. Rejects the request with `AuthFailed` when no valid token is present.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

/// Optional session. Absent header means anonymous; a malformed or invalid token is
/// still rejected rather than silently downgraded.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Session>);

fn session_from_parts(parts: &Parts, state: &AppState) -> Result<Option<Session>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let header = header
        .to_str()
        .map_err(|_| AppError::AuthFailed("Invalid Authorization header".into()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::AuthFailed("Invalid Authorization format. Expected: Bearer <token>".into())
    })?;

    let claims = validate_access_token(token, &state.config.supabase_jwt_secret).map_err(|e| {
        tracing::debug!("Rejected access token: {e}");
        AppError::AuthFailed("Your session is invalid or has expired. Please sign in again.".into())
    })?;

    Ok(Some(Session {
        user_id: claims.sub,
        email: claims.email,
        access_token: token.to_string(),
    }))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)?
            .map(AuthUser)
            .ok_or_else(|| AppError::AuthFailed("Please sign in to continue.".into()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(session_from_parts(parts, state)?))
    }
}
