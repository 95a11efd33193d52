use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::post::PostRow;
use crate::models::profile::ProfileRow;
use crate::persistence::{PostStore, ProfileStore, StoreError};
use crate::preferences::options::PreferenceOption;
use crate::preferences::Preferences;

/// Postgres-backed store over the hosted `posts` and `profiles` tables.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn save_generated_post(
        &self,
        user_id: Uuid,
        topic: &str,
        content: &str,
        parameters: &Value,
    ) -> Result<PostRow, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, user_id, topic, content, parameters)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(topic)
        .bind(content)
        .bind(parameters)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved post {} for user {}", row.id, user_id);
        Ok(row)
    }

    async fn list_posts(&self, user_id: Uuid) -> Result<Vec<PostRow>, StoreError> {
        Ok(sqlx::query_as::<_, PostRow>(
            "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted post {post_id} for user {user_id}");
            return Ok(());
        }

        // Nothing deleted: tell a foreign row apart from a missing one
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        if exists {
            Err(StoreError::NotOwned)
        } else {
            Err(StoreError::NotFound(format!("Post {post_id} not found")))
        }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        defaults: &Preferences,
    ) -> Result<ProfileRow, StoreError> {
        // Full overwrite: every column is replaced, nothing is merged
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles
                (id, default_language, default_post_type, default_goal, default_speaker,
                 default_gender, default_audience, default_tone, default_length, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
            ON CONFLICT (id) DO UPDATE SET
                default_language = EXCLUDED.default_language,
                default_post_type = EXCLUDED.default_post_type,
                default_goal = EXCLUDED.default_goal,
                default_speaker = EXCLUDED.default_speaker,
                default_gender = EXCLUDED.default_gender,
                default_audience = EXCLUDED.default_audience,
                default_tone = EXCLUDED.default_tone,
                default_length = EXCLUDED.default_length,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&defaults.language)
        .bind(&defaults.post_type)
        .bind(defaults.goal.value())
        .bind(defaults.speaker.value())
        .bind(defaults.gender.value())
        .bind(defaults.audience.value())
        .bind(defaults.tone.value())
        .bind(defaults.length.value())
        .fetch_one(&self.pool)
        .await?;

        info!("Upserted profile defaults for user {user_id}");
        Ok(row)
    }
}
