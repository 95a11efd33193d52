//! In-memory store stub. Applies the same per-user ownership rules as the hosted store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::post::PostRow;
use crate::models::profile::ProfileRow;
use crate::persistence::{PostStore, ProfileStore, StoreError};
use crate::preferences::options::PreferenceOption;
use crate::preferences::Preferences;

#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<PostRow>>,
    profiles: Mutex<HashMap<Uuid, ProfileRow>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Makes every subsequent write fail with `StoreError::Unavailable`.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn save_generated_post(
        &self,
        user_id: Uuid,
        topic: &str,
        content: &str,
        parameters: &Value,
    ) -> Result<PostRow, StoreError> {
        self.check_writable()?;
        let mut posts = self.posts.lock().unwrap();
        // Strictly increasing timestamps keep ordering deterministic within a test
        let created_at = Utc::now() + Duration::milliseconds(posts.len() as i64);
        let row = PostRow {
            id: Uuid::new_v4(),
            user_id,
            topic: topic.to_string(),
            content: content.to_string(),
            parameters: parameters.clone(),
            created_at,
        };
        posts.push(row.clone());
        Ok(row)
    }

    async fn list_posts(&self, user_id: Uuid) -> Result<Vec<PostRow>, StoreError> {
        let mut rows: Vec<PostRow> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn delete_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut posts = self.posts.lock().unwrap();
        match posts.iter().position(|p| p.id == post_id) {
            None => Err(StoreError::NotFound(format!("Post {post_id} not found"))),
            Some(i) if posts[i].user_id != user_id => Err(StoreError::NotOwned),
            Some(i) => {
                posts.remove(i);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        defaults: &Preferences,
    ) -> Result<ProfileRow, StoreError> {
        self.check_writable()?;
        let row = ProfileRow {
            id: user_id,
            default_language: defaults.language.clone(),
            default_post_type: defaults.post_type.clone(),
            default_goal: defaults.goal.value().to_string(),
            default_speaker: defaults.speaker.value().to_string(),
            default_gender: defaults.gender.value().to_string(),
            default_audience: defaults.audience.value().to_string(),
            default_tone: defaults.tone.value().to_string(),
            default_length: defaults.length.value().to_string(),
            updated_at: Utc::now(),
        };
        self.profiles.lock().unwrap().insert(user_id, row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::options::Tone;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_posts_is_scoped_and_newest_first() {
        let store = MemoryStore::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.save_generated_post(alice, "first", "a", &json!({})).await.unwrap();
        store.save_generated_post(bob, "bob's", "b", &json!({})).await.unwrap();
        store.save_generated_post(alice, "second", "c", &json!({})).await.unwrap();

        let posts = store.list_posts(alice).await.unwrap();
        let topics: Vec<_> = posts.iter().map(|p| p.topic.as_str()).collect();
        assert_eq!(topics, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_delete_foreign_post_is_rejected() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let post = store.save_generated_post(owner, "t", "c", &json!({})).await.unwrap();

        let err = store.delete_post(intruder, post.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotOwned));
        assert_eq!(store.post_count(), 1);

        store.delete_post(owner, post.id).await.unwrap();
        assert_eq!(store.post_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let store = MemoryStore::default();
        let err = store.delete_post(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_single_row() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        store.upsert_profile(user, &Preferences::default()).await.unwrap();

        let updated = Preferences {
            tone: Tone::Humorous,
            ..Default::default()
        };
        store.upsert_profile(user, &updated).await.unwrap();

        let profile = store.get_profile(user).await.unwrap().unwrap();
        assert_eq!(profile.default_tone, "humorous");
        assert_eq!(store.profiles.lock().unwrap().len(), 1);
    }
}
