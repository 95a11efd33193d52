//! Preference model: the validated inputs that drive prompt assembly.
//!
//! Raw client input arrives as strings (`RawPreferences`) and is validated into a
//! typed `PreferenceSet`. A value outside its enumeration is a validation failure;
//! an unknown language code is tolerated and resolved by `language_display_name`.

pub mod handlers;
pub mod options;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use options::{
    Audience, Gender, Goal, InvalidOption, Language, Length, PreferenceOption, Speaker, Tone,
    DEFAULT_LANGUAGE,
};

/// Post type used when the client leaves it blank.
pub const DEFAULT_POST_TYPE: &str = "general";

impl From<InvalidOption> for AppError {
    fn from(e: InvalidOption) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Every preference except the topic. This is what a user profile stores as defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    /// Kept as the raw code; unknown codes fall back at render time.
    pub language: String,
    pub post_type: String,
    pub goal: Goal,
    pub speaker: Speaker,
    pub gender: Gender,
    pub audience: Audience,
    pub tone: Tone,
    pub length: Length,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.value().to_string(),
            post_type: DEFAULT_POST_TYPE.to_string(),
            goal: Goal::Visibility,
            speaker: Speaker::FirstPersonSingular,
            gender: Gender::Unspecified,
            audience: Audience::FormalDirect,
            tone: Tone::Expert,
            length: Length::Medium,
        }
    }
}

impl Preferences {
    /// Gender is only meaningful for a first-person-singular speaker.
    pub fn effective_gender(&self) -> Option<Gender> {
        match (self.speaker, self.gender) {
            (Speaker::FirstPersonSingular, Gender::Male | Gender::Female) => Some(self.gender),
            _ => None,
        }
    }

    /// Converts back into the string form used by clients and the profile table.
    pub fn to_raw(&self) -> RawPreferences {
        RawPreferences {
            topic: String::new(),
            language: Some(self.language.clone()),
            post_type: Some(self.post_type.clone()),
            goal: Some(self.goal.value().to_string()),
            speaker: Some(self.speaker.value().to_string()),
            gender: Some(self.gender.value().to_string()),
            audience: Some(self.audience.value().to_string()),
            tone: Some(self.tone.value().to_string()),
            length: Some(self.length.value().to_string()),
        }
    }
}

/// A validated Preference Set: the topic plus every preference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceSet {
    pub topic: String,
    #[serde(flatten)]
    pub preferences: Preferences,
}

/// Unvalidated preference input as sent by clients.
/// Omitted fields take the built-in defaults; present fields must be valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPreferences {
    #[serde(default)]
    pub topic: String,
    pub language: Option<String>,
    pub post_type: Option<String>,
    pub goal: Option<String>,
    pub speaker: Option<String>,
    pub gender: Option<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
    pub length: Option<String>,
}

impl RawPreferences {
    /// Validates the non-topic fields, filling omitted ones from `Preferences::default()`.
    pub fn validate_preferences(&self) -> Result<Preferences, AppError> {
        let defaults = Preferences::default();
        Ok(Preferences {
            language: non_blank(self.language.as_deref())
                .map(|code| code.trim().to_lowercase())
                .unwrap_or(defaults.language),
            post_type: non_blank(self.post_type.as_deref())
                .map(|t| t.trim().to_string())
                .unwrap_or(defaults.post_type),
            goal: parse_or(self.goal.as_deref(), defaults.goal)?,
            speaker: parse_or(self.speaker.as_deref(), defaults.speaker)?,
            gender: parse_or(self.gender.as_deref(), defaults.gender)?,
            audience: parse_or(self.audience.as_deref(), defaults.audience)?,
            tone: parse_or(self.tone.as_deref(), defaults.tone)?,
            length: parse_or(self.length.as_deref(), defaults.length)?,
        })
    }

    /// Full validation. An empty topic fails before anything else is checked.
    pub fn validate(&self) -> Result<PreferenceSet, AppError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }
        Ok(PreferenceSet {
            topic: topic.to_string(),
            preferences: self.validate_preferences()?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T: PreferenceOption>(raw: Option<&str>, default: T) -> Result<T, AppError> {
    match non_blank(raw) {
        Some(value) => Ok(T::parse(value)?),
        None => Ok(default),
    }
}

/// Parses a field that must be present, as required for profile defaults.
pub fn parse_required<T: PreferenceOption>(raw: Option<&str>) -> Result<T, AppError> {
    let value = non_blank(raw)
        .ok_or_else(|| AppError::Validation(format!("{} is required", T::FIELD)))?;
    Ok(T::parse(value)?)
}

/// Checks that a language code is one of the offered languages.
/// Used where codes are stored; rendering itself tolerates unknown codes.
pub fn parse_language(raw: Option<&str>) -> Result<String, AppError> {
    let language = parse_required::<Language>(raw)?;
    Ok(language.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(topic: &str) -> RawPreferences {
        RawPreferences {
            topic: topic.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_topic_is_rejected() {
        let err = raw("   ").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("topic")));
    }

    #[test]
    fn test_omitted_fields_take_defaults() {
        let set = raw("remote work").validate().unwrap();
        assert_eq!(set.topic, "remote work");
        assert_eq!(set.preferences, Preferences::default());
    }

    #[test]
    fn test_topic_is_trimmed() {
        let set = raw("  AI in Africa \n").validate().unwrap();
        assert_eq!(set.topic, "AI in Africa");
    }

    #[test]
    fn test_invalid_enum_value_is_validation_failure() {
        let mut input = raw("hiring");
        input.audience = Some("shouting".to_string());
        let err = input.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("audience")));
    }

    #[test]
    fn test_unknown_language_is_kept_not_rejected() {
        let mut input = raw("hiring");
        input.language = Some("xx".to_string());
        let set = input.validate().unwrap();
        assert_eq!(set.preferences.language, "xx");
    }

    #[test]
    fn test_blank_post_type_defaults() {
        let mut input = raw("hiring");
        input.post_type = Some("  ".to_string());
        let set = input.validate().unwrap();
        assert_eq!(set.preferences.post_type, DEFAULT_POST_TYPE);
    }

    #[test]
    fn test_effective_gender_only_for_singular_speaker() {
        let mut prefs = Preferences {
            gender: Gender::Female,
            ..Default::default()
        };
        assert_eq!(prefs.effective_gender(), Some(Gender::Female));

        prefs.speaker = Speaker::FirstPersonPlural;
        assert_eq!(prefs.effective_gender(), None);

        prefs.speaker = Speaker::Impersonal;
        assert_eq!(prefs.effective_gender(), None);

        prefs.speaker = Speaker::FirstPersonSingular;
        prefs.gender = Gender::Unspecified;
        assert_eq!(prefs.effective_gender(), None);
    }

    #[test]
    fn test_to_raw_round_trips() {
        let prefs = Preferences {
            language: "es".to_string(),
            post_type: "case study".to_string(),
            goal: Goal::Conversion,
            speaker: Speaker::FirstPersonPlural,
            gender: Gender::Unspecified,
            audience: Audience::None,
            tone: Tone::Humorous,
            length: Length::Long,
        };
        let back = prefs.to_raw().validate_preferences().unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn test_parse_required_rejects_missing_field() {
        let err = parse_required::<Tone>(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "tone is required"));
    }

    #[test]
    fn test_parse_language_rejects_unknown_code_for_storage() {
        assert!(parse_language(Some("xx")).is_err());
        assert_eq!(parse_language(Some("EN")).unwrap(), "en");
    }

    #[test]
    fn test_preference_set_serializes_flat() {
        let set = raw("remote work").validate().unwrap();
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["topic"], "remote work");
        assert_eq!(value["speaker"], "first-person-singular");
        assert_eq!(value["audience"], "formal-direct");
    }
}
