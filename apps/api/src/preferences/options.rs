//! Closed option lists for every user-facing preference.
//!
//! Each list is ordered the way it is presented to the user. Canonical values are
//! kebab-case English; the French values stored by earlier clients are accepted as
//! aliases on input but never emitted.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}'")]
pub struct InvalidOption {
    pub field: &'static str,
    pub value: String,
}

/// A closed enumeration of (value, label) pairs.
pub trait PreferenceOption: Sized + Copy + PartialEq + 'static {
    /// Field name used in validation messages.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn value(self) -> &'static str;
    fn label(self) -> &'static str;

    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Looks `raw` up by canonical value or alias. Matching is case-insensitive.
    fn parse(raw: &str) -> Result<Self, InvalidOption> {
        let needle = raw.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|opt| opt.value() == needle || opt.aliases().iter().any(|a| *a == needle))
            .ok_or_else(|| InvalidOption {
                field: Self::FIELD,
                value: raw.to_string(),
            })
    }
}

/// One entry of an option list as exposed to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

/// Returns the ordered (value, label) list for an enumeration.
pub fn entries<T: PreferenceOption>() -> Vec<OptionEntry> {
    T::ALL
        .iter()
        .map(|opt| OptionEntry {
            value: opt.value(),
            label: opt.label(),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Language
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    French,
    English,
    Spanish,
    German,
    Italian,
    Portuguese,
}

/// Language used when a code is not recognised.
pub const DEFAULT_LANGUAGE: Language = Language::French;

impl PreferenceOption for Language {
    const FIELD: &'static str = "language";
    const ALL: &'static [Self] = &[
        Language::French,
        Language::English,
        Language::Spanish,
        Language::German,
        Language::Italian,
        Language::Portuguese,
    ];

    fn value(self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
            Language::Spanish => "es",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Language::French => "Français",
            Language::English => "English",
            Language::Spanish => "Español",
            Language::German => "Deutsch",
            Language::Italian => "Italiano",
            Language::Portuguese => "Português",
        }
    }
}

/// Resolves a language code to its display name.
/// Unknown codes fall back to the default language instead of failing.
pub fn language_display_name(code: &str) -> &'static str {
    Language::parse(code).unwrap_or(DEFAULT_LANGUAGE).label()
}

// ────────────────────────────────────────────────────────────────────────────
// Goal
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Visibility,
    Engagement,
    Conversion,
    Authority,
}

impl PreferenceOption for Goal {
    const FIELD: &'static str = "goal";
    const ALL: &'static [Self] = &[
        Goal::Visibility,
        Goal::Engagement,
        Goal::Conversion,
        Goal::Authority,
    ];

    fn value(self) -> &'static str {
        match self {
            Goal::Visibility => "visibility",
            Goal::Engagement => "engagement",
            Goal::Conversion => "conversion",
            Goal::Authority => "authority",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Goal::Visibility => "Visibility (maximize views)",
            Goal::Engagement => "Engagement (spark discussion)",
            Goal::Conversion => "Conversion (sell / generate leads)",
            Goal::Authority => "Authority (prove expertise)",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Goal::Visibility => &["visibilité"],
            Goal::Engagement => &[],
            Goal::Conversion => &["vente"],
            Goal::Authority => &["autorité"],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tone
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Expert,
    Storytelling,
    Polarizing,
    Professional,
    Humorous,
}

impl PreferenceOption for Tone {
    const FIELD: &'static str = "tone";
    const ALL: &'static [Self] = &[
        Tone::Expert,
        Tone::Storytelling,
        Tone::Polarizing,
        Tone::Professional,
        Tone::Humorous,
    ];

    fn value(self) -> &'static str {
        match self {
            Tone::Expert => "expert",
            Tone::Storytelling => "storytelling",
            Tone::Polarizing => "polarizing",
            Tone::Professional => "professional",
            Tone::Humorous => "humorous",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tone::Expert => "Educational & Expert",
            Tone::Storytelling => "Emotional & Personal",
            Tone::Polarizing => "Polarizing & Direct",
            Tone::Professional => "Formal & Corporate",
            Tone::Humorous => "Light & Funny",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Tone::Expert => &["pédagogue"],
            Tone::Storytelling => &[],
            Tone::Polarizing => &["clivant"],
            Tone::Professional => &["professionnel"],
            Tone::Humorous => &["humoristique"],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Speaker
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Speaker {
    FirstPersonSingular,
    FirstPersonPlural,
    Impersonal,
}

impl PreferenceOption for Speaker {
    const FIELD: &'static str = "speaker";
    const ALL: &'static [Self] = &[
        Speaker::FirstPersonSingular,
        Speaker::FirstPersonPlural,
        Speaker::Impersonal,
    ];

    fn value(self) -> &'static str {
        match self {
            Speaker::FirstPersonSingular => "first-person-singular",
            Speaker::FirstPersonPlural => "first-person-plural",
            Speaker::Impersonal => "impersonal",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Speaker::FirstPersonSingular => "I",
            Speaker::FirstPersonPlural => "We",
            Speaker::Impersonal => "Neutral (impersonal)",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Speaker::FirstPersonSingular => &["je"],
            Speaker::FirstPersonPlural => &["nous"],
            Speaker::Impersonal => &["neutre"],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gender
// ────────────────────────────────────────────────────────────────────────────

/// Grammatical gender of a first-person-singular speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl PreferenceOption for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Unspecified];

    fn value(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unspecified => "Unspecified",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Gender::Male => &["homme"],
            Gender::Female => &["femme"],
            Gender::Unspecified => &[],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Audience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    InformalDirect,
    FormalDirect,
    None,
}

impl PreferenceOption for Audience {
    const FIELD: &'static str = "audience";
    const ALL: &'static [Self] = &[
        Audience::InformalDirect,
        Audience::FormalDirect,
        Audience::None,
    ];

    fn value(self) -> &'static str {
        match self {
            Audience::InformalDirect => "informal-direct",
            Audience::FormalDirect => "formal-direct",
            Audience::None => "none",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Audience::InformalDirect => "Direct & familiar",
            Audience::FormalDirect => "Direct & formal",
            Audience::None => "Nobody (editorial style)",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Audience::InformalDirect => &["tu"],
            Audience::FormalDirect => &["vous"],
            Audience::None => &[],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Length
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Length {
    Short,
    Medium,
    Long,
}

impl Length {
    /// Target size handed to the model.
    pub fn word_range(self) -> &'static str {
        match self {
            Length::Short => "under 150 words",
            Length::Medium => "between 150 and 300 words",
            Length::Long => "between 300 and 500 words",
        }
    }
}

impl PreferenceOption for Length {
    const FIELD: &'static str = "length";
    const ALL: &'static [Self] = &[Length::Short, Length::Medium, Length::Long];

    fn value(self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Long => "Long",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Length::Short => &["court"],
            Length::Medium => &["moyen"],
            Length::Long => &[],
        }
    }
}
