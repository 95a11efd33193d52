//! Record-store access for generated posts and profile defaults.
//!
//! `AppState` holds each store as an `Arc<dyn ...>`; tests swap in `memory::MemoryStore`.
//!
//! CRITICAL: every operation is scoped to the caller's user id. A user can only read,
//! overwrite or delete their own rows.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::post::PostRow;
use crate::models::profile::ProfileRow;
use crate::preferences::Preferences;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("Record belongs to another user")]
    NotOwned,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts one history record. Called once per successful generation.
    async fn save_generated_post(
        &self,
        user_id: Uuid,
        topic: &str,
        content: &str,
        parameters: &Value,
    ) -> Result<PostRow, StoreError>;

    /// All posts owned by `user_id`, newest first.
    async fn list_posts(&self, user_id: Uuid) -> Result<Vec<PostRow>, StoreError>;

    /// Hard-deletes a post. `NotOwned` if it belongs to someone else, `NotFound` if absent.
    async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError>;

    /// Creates or fully overwrites the user's single profile row. Last write wins.
    async fn upsert_profile(
        &self,
        user_id: Uuid,
        defaults: &Preferences,
    ) -> Result<ProfileRow, StoreError>;
}
