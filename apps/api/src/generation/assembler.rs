//! Renders a validated Preference Set into the instruction string sent to the
//! generation model.
//!
//! Pure and deterministic: the same `PreferenceSet` always yields byte-identical text.
//! Topic, post type and labels are interpolated verbatim; the destination is a
//! language model, not a parser, so nothing is escaped.

use crate::generation::prompts::{
    AUDIENCE_FORMAL, AUDIENCE_INFORMAL, AUDIENCE_NONE, CLOSING_CALL_TO_ACTION, CLOSING_QUESTION,
    CLOSING_QUESTION_EDITORIAL, CLOSING_QUESTION_IF_FITTING, GENDER_AGREEMENT, HOOK_MAX_WORDS,
    LANGUAGE_INSTRUCTION, POST_PROMPT_TEMPLATE, SPEAKER_IMPERSONAL, SPEAKER_PLURAL,
    SPEAKER_SINGULAR,
};
use crate::preferences::options::{
    language_display_name, Audience, Gender, Goal, PreferenceOption, Speaker,
};
use crate::preferences::{PreferenceSet, Preferences};

/// Renders the full generation prompt.
pub fn assemble_prompt(set: &PreferenceSet) -> String {
    let prefs = &set.preferences;

    let fixed = POST_PROMPT_TEMPLATE
        .replace("{goal}", prefs.goal.label())
        .replace("{tone}", prefs.tone.label())
        .replace("{length}", prefs.length.label())
        .replace("{word_range}", prefs.length.word_range())
        .replace("{speaker_clause}", &speaker_clause(prefs))
        .replace("{audience_clause}", audience_clause(prefs.audience))
        .replace("{language_clause}", &language_clause(&prefs.language))
        .replace("{hook_max_words}", &HOOK_MAX_WORDS.to_string())
        .replace("{closing_clause}", closing_clause(prefs.goal, prefs.audience));

    fill_verbatim(
        &fixed,
        &[("topic", set.topic.as_str()), ("post_type", prefs.post_type.as_str())],
    )
}

/// Substitutes `{name}` slots in one left-to-right pass. Inserted values are never
/// rescanned, so user text containing `{topic}` or `{post_type}` stays as typed.
fn fill_verbatim(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = fields.iter().find_map(|(name, value)| {
            after
                .strip_prefix(name)
                .and_then(|r| r.strip_prefix('}'))
                .map(|remaining| (*value, remaining))
        });
        match slot {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn speaker_clause(prefs: &Preferences) -> String {
    match prefs.speaker {
        Speaker::FirstPersonSingular => match prefs.effective_gender() {
            Some(gender) => format!(
                "{SPEAKER_SINGULAR} {}",
                GENDER_AGREEMENT.replace("{gender}", gender_noun(gender))
            ),
            None => SPEAKER_SINGULAR.to_string(),
        },
        Speaker::FirstPersonPlural => SPEAKER_PLURAL.to_string(),
        Speaker::Impersonal => SPEAKER_IMPERSONAL.to_string(),
    }
}

fn gender_noun(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "a man",
        Gender::Female => "a woman",
        // effective_gender() never yields this
        Gender::Unspecified => "unspecified",
    }
}

fn audience_clause(audience: Audience) -> &'static str {
    match audience {
        Audience::InformalDirect => AUDIENCE_INFORMAL,
        Audience::FormalDirect => AUDIENCE_FORMAL,
        Audience::None => AUDIENCE_NONE,
    }
}

fn language_clause(code: &str) -> String {
    LANGUAGE_INSTRUCTION.replace("{language}", language_display_name(code))
}

fn closing_clause(goal: Goal, audience: Audience) -> &'static str {
    match (goal, audience) {
        (_, Audience::None) => CLOSING_QUESTION_EDITORIAL,
        (Goal::Engagement, _) => CLOSING_QUESTION,
        (Goal::Conversion, _) => CLOSING_CALL_TO_ACTION,
        (Goal::Visibility | Goal::Authority, _) => CLOSING_QUESTION_IF_FITTING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::options::{Length, Tone};
    use crate::preferences::RawPreferences;

    const GENDER_MARKER: &str = "grammatical gender agreement";

    fn set_with(speaker: Speaker, gender: Gender, audience: Audience) -> PreferenceSet {
        PreferenceSet {
            topic: "the four-day work week".to_string(),
            preferences: Preferences {
                speaker,
                gender,
                audience,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let set = set_with(Speaker::FirstPersonSingular, Gender::Female, Audience::None);
        let first = assemble_prompt(&set);
        let second = assemble_prompt(&set.clone());
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_no_placeholder_left_unfilled() {
        for speaker in Speaker::ALL {
            for audience in Audience::ALL {
                let prompt = assemble_prompt(&set_with(*speaker, Gender::Male, *audience));
                assert!(!prompt.contains('{'), "unfilled placeholder in: {prompt}");
            }
        }
    }

    #[test]
    fn test_gender_clause_iff_singular_speaker_with_gender() {
        for speaker in Speaker::ALL {
            for gender in Gender::ALL {
                let prompt = assemble_prompt(&set_with(*speaker, *gender, Audience::FormalDirect));
                let expected = *speaker == Speaker::FirstPersonSingular
                    && *gender != Gender::Unspecified;
                assert_eq!(
                    prompt.contains(GENDER_MARKER),
                    expected,
                    "speaker={speaker:?} gender={gender:?}"
                );
            }
        }
    }

    #[test]
    fn test_gender_clause_names_the_gender() {
        let prompt = assemble_prompt(&set_with(
            Speaker::FirstPersonSingular,
            Gender::Female,
            Audience::FormalDirect,
        ));
        assert!(prompt.contains("The author is a woman"));
    }

    #[test]
    fn test_speaker_clauses() {
        let plural = assemble_prompt(&set_with(
            Speaker::FirstPersonPlural,
            Gender::Unspecified,
            Audience::FormalDirect,
        ));
        assert!(plural.contains(SPEAKER_PLURAL));
        assert!(!plural.contains(SPEAKER_SINGULAR));

        let neutral = assemble_prompt(&set_with(
            Speaker::Impersonal,
            Gender::Unspecified,
            Audience::FormalDirect,
        ));
        assert!(neutral.contains(SPEAKER_IMPERSONAL));
    }

    #[test]
    fn test_audience_clause_is_exclusive() {
        let cases = [
            (Audience::InformalDirect, AUDIENCE_INFORMAL),
            (Audience::FormalDirect, AUDIENCE_FORMAL),
            (Audience::None, AUDIENCE_NONE),
        ];
        for (audience, expected) in cases {
            let prompt = assemble_prompt(&set_with(Speaker::Impersonal, Gender::Unspecified, audience));
            for (_, clause) in cases {
                assert_eq!(
                    prompt.contains(clause),
                    clause == expected,
                    "audience={audience:?}"
                );
            }
        }
    }

    #[test]
    fn test_audience_none_forbids_direct_address() {
        let prompt = assemble_prompt(&set_with(Speaker::Impersonal, Gender::Unspecified, Audience::None));
        assert!(prompt.contains("Never address the reader directly"));
        assert!(prompt.contains(CLOSING_QUESTION_EDITORIAL));
    }

    #[test]
    fn test_unknown_language_falls_back_to_default_name() {
        let mut set = set_with(Speaker::Impersonal, Gender::Unspecified, Audience::None);
        set.preferences.language = "tlh".to_string();
        let prompt = assemble_prompt(&set);
        assert!(prompt.contains("Write the entire post in Français"));
    }

    #[test]
    fn test_context_clause_is_verbatim() {
        let mut set = set_with(Speaker::Impersonal, Gender::Unspecified, Audience::None);
        set.topic = "Why \"legacy\" code pays the bills".to_string();
        set.preferences.post_type = "Carousel teaser".to_string();
        set.preferences.goal = Goal::Engagement;
        let prompt = assemble_prompt(&set);
        assert!(prompt.contains("Topic: \"Why \"legacy\" code pays the bills\""));
        assert!(prompt.contains("Post type: Carousel teaser"));
        assert!(prompt.contains(Goal::Engagement.label()));
    }

    #[test]
    fn test_braces_in_topic_are_left_alone() {
        let mut set = set_with(Speaker::Impersonal, Gender::Unspecified, Audience::None);
        set.topic = "templating with {goal} and {tone}".to_string();
        let prompt = assemble_prompt(&set);
        assert!(prompt.contains("templating with {goal} and {tone}"));
    }

    #[test]
    fn test_placeholders_in_post_type_are_left_alone() {
        let mut set = set_with(Speaker::Impersonal, Gender::Unspecified, Audience::None);
        set.topic = "remote hiring".to_string();
        set.preferences.post_type = "Reply to {topic} thread".to_string();
        let prompt = assemble_prompt(&set);
        assert!(prompt.contains("Post type: Reply to {topic} thread"));
        assert!(prompt.contains("Topic: \"remote hiring\""));
    }

    #[test]
    fn test_topic_naming_post_type_slot_is_left_alone() {
        let mut set = set_with(Speaker::Impersonal, Gender::Unspecified, Audience::None);
        set.topic = "why {post_type} matters".to_string();
        set.preferences.post_type = "Carousel".to_string();
        let prompt = assemble_prompt(&set);
        assert!(prompt.contains("Topic: \"why {post_type} matters\""));
        assert!(prompt.contains("Post type: Carousel"));
    }

    #[test]
    fn test_fill_verbatim_keeps_unknown_and_unclosed_braces() {
        let out = fill_verbatim("a {x} {topic} {topic", &[("topic", "T")]);
        assert_eq!(out, "a {x} T {topic");
    }

    #[test]
    fn test_closing_clause_follows_goal() {
        let mut set = set_with(Speaker::Impersonal, Gender::Unspecified, Audience::FormalDirect);
        set.preferences.goal = Goal::Engagement;
        assert!(assemble_prompt(&set).contains(CLOSING_QUESTION));
        set.preferences.goal = Goal::Conversion;
        assert!(assemble_prompt(&set).contains(CLOSING_CALL_TO_ACTION));
        set.preferences.goal = Goal::Authority;
        assert!(assemble_prompt(&set).contains(CLOSING_QUESTION_IF_FITTING));
    }

    #[test]
    fn test_renewable_energy_scenario() {
        let input = RawPreferences {
            topic: "renewable energy in rural logistics".to_string(),
            language: Some("en".to_string()),
            post_type: None,
            goal: Some("authority".to_string()),
            speaker: Some("first-person-singular".to_string()),
            gender: Some("unspecified".to_string()),
            audience: Some("formal-direct".to_string()),
            tone: Some("expert".to_string()),
            length: Some("medium".to_string()),
        };
        let set = input.validate().unwrap();
        assert_eq!(set.preferences.tone, Tone::Expert);
        assert_eq!(set.preferences.length, Length::Medium);

        let prompt = assemble_prompt(&set);
        assert!(prompt.contains("Write the entire post in English"));
        assert!(prompt.contains(SPEAKER_SINGULAR));
        assert!(!prompt.contains(GENDER_MARKER));
        assert!(prompt.contains(AUDIENCE_FORMAL));
        assert!(!prompt.contains(AUDIENCE_INFORMAL));
        assert!(prompt.contains(&format!("under {HOOK_MAX_WORDS} words")));
        assert!(prompt.contains("3 to 5 relevant hashtags"));
        assert!(prompt.contains("renewable energy in rural logistics"));
        assert!(prompt.contains(Length::Medium.word_range()));
    }
}
