// All prompt text for post generation.
// Bump PROMPT_TEMPLATE_VERSION whenever wording or a fixed rule below changes.

pub const PROMPT_TEMPLATE_VERSION: u32 = 1;

/// Word ceiling for the opening hook. Fixed per template version, not user-configurable.
pub const HOOK_MAX_WORDS: u32 = 15;

/// Post generation template.
/// Replace: {topic}, {post_type}, {goal}, {tone}, {length}, {word_range},
///          {speaker_clause}, {audience_clause}, {language_clause},
///          {hook_max_words}, {closing_clause}
pub const POST_PROMPT_TEMPLATE: &str = r#"You are a LinkedIn expert. Write a post optimized for reach and engagement.

CONTEXT:
- Topic: "{topic}"
- Post type: {post_type}
- Goal: {goal}
- Tone: {tone}
- Length: {length} ({word_range})

VOICE:
- {speaker_clause}
- {audience_clause}

LANGUAGE:
- {language_clause}

WRITING RULES:
- Hook: the opening line must be under {hook_max_words} words and must grab attention.
- Insert a line break right after the hook.
- Keep paragraphs short: one to three sentences each, with air between them.
- Include 1 to 4 relevant emojis where they add meaning.
- {closing_clause}
- End the post with 3 to 5 relevant hashtags.
- Output ONLY the post body: no title, no preamble, no comments about the post."#;

pub const SPEAKER_SINGULAR: &str = "Write in the first person singular (\"I\").";
pub const SPEAKER_PLURAL: &str =
    "Write in the first person plural (\"we\"), speaking for a team or an organization.";
pub const SPEAKER_IMPERSONAL: &str =
    "Write impersonally: use no personal pronouns, neither \"I\" nor \"we\".";

/// Appended to the singular speaker clause. Replace `{gender}`.
pub const GENDER_AGREEMENT: &str =
    "The author is {gender}: apply the matching grammatical gender agreement wherever the language requires it.";

pub const AUDIENCE_INFORMAL: &str =
    "Address the reader directly and informally, as you would a peer (familiar \"you\" forms).";
pub const AUDIENCE_FORMAL: &str =
    "Address the reader directly and formally, using polite \"you\" forms.";
pub const AUDIENCE_NONE: &str =
    "Never address the reader directly: no \"you\" in any form, editorial style only.";

/// Replace `{language}`.
pub const LANGUAGE_INSTRUCTION: &str =
    "Write the entire post in {language}, hashtags included.";

pub const CLOSING_QUESTION: &str =
    "Finish the body with an engaging open question that invites comments.";
pub const CLOSING_QUESTION_IF_FITTING: &str =
    "If it serves the goal, finish the body with an engaging question.";
pub const CLOSING_CALL_TO_ACTION: &str =
    "Finish the body with a clear call to action; a question is fine if it supports it.";
pub const CLOSING_QUESTION_EDITORIAL: &str =
    "If it serves the goal, finish the body with an open question phrased without addressing the reader.";
