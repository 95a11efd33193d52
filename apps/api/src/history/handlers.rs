//! Generated-post history: list and delete, always scoped to the signed-in user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::post::PostRow;
use crate::state::AppState;

/// GET /api/v1/posts
///
/// The caller's posts, newest first.
pub async fn handle_list_posts(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> Result<Json<Vec<PostRow>>, AppError> {
    let posts = state.posts.list_posts(session.user_id).await?;
    Ok(Json(posts))
}

/// DELETE /api/v1/posts/:id
///
/// Immediate hard delete. Confirmation is the client's job.
pub async fn handle_delete_post(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.posts.delete_post(session.user_id, post_id).await?;
    info!("User {} deleted post {post_id}", session.user_id);
    Ok(StatusCode::NO_CONTENT)
}
