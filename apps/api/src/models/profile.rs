use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::preferences::RawPreferences;

/// A user's saved defaults as stored in the `profiles` table. `id` is the user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub default_language: String,
    pub default_post_type: String,
    pub default_goal: String,
    pub default_speaker: String,
    pub default_gender: String,
    pub default_audience: String,
    pub default_tone: String,
    pub default_length: String,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// A profile counts as configured once a default tone has been saved.
    pub fn has_saved_defaults(&self) -> bool {
        !self.default_tone.trim().is_empty()
    }

    /// The saved defaults in the raw form used to pre-fill the wizard.
    pub fn to_raw_preferences(&self) -> RawPreferences {
        RawPreferences {
            topic: String::new(),
            language: Some(self.default_language.clone()),
            post_type: Some(self.default_post_type.clone()),
            goal: Some(self.default_goal.clone()),
            speaker: Some(self.default_speaker.clone()),
            gender: Some(self.default_gender.clone()),
            audience: Some(self.default_audience.clone()),
            tone: Some(self.default_tone.clone()),
            length: Some(self.default_length.clone()),
        }
    }
}
