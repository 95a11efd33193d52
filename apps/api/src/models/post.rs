use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A generated post as stored in the `posts` table. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub content: String,
    /// The Preference Set the post was generated from, stored as an opaque blob.
    pub parameters: Value,
    pub created_at: DateTime<Utc>,
}
