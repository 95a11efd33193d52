//! Explicit state machine for the post-creation form flow.
//!
//! Steps move along a fixed transition table. Moving forward requires the current
//! step's fields to be valid; the topic gate is checked at Content and again at Confirm. Orthogonal to the step are the view (form, generating,
//! result) and the auth overlay. At most one generation is in flight per wizard.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::GENERATION_FAILED_NOTICE;
use crate::generation::service::GenerationRequest;
use crate::models::profile::ProfileRow;
use crate::preferences::options::{
    Audience, Gender, Goal, InvalidOption, Language, Length, PreferenceOption, Speaker, Tone,
};
use crate::preferences::{Preferences, RawPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Goal, post type, language.
    Context,
    /// Speaker, gender, audience.
    Identity,
    /// Topic, tone, length.
    Content,
    Confirm,
}

impl Step {
    fn requires_topic(self) -> bool {
        matches!(self, Step::Content | Step::Confirm)
    }

    /// Checks the option fields edited on this step. Blank fields take defaults at
    /// submit and pass here; Confirm has no fields of its own.
    fn check_fields(self, draft: &RawPreferences) -> Result<(), InvalidOption> {
        match self {
            Step::Context => {
                check_option::<Goal>(draft.goal.as_deref())?;
                check_option::<Language>(draft.language.as_deref())
            }
            Step::Identity => {
                check_option::<Speaker>(draft.speaker.as_deref())?;
                check_option::<Gender>(draft.gender.as_deref())?;
                check_option::<Audience>(draft.audience.as_deref())
            }
            Step::Content => {
                check_option::<Tone>(draft.tone.as_deref())?;
                check_option::<Length>(draft.length.as_deref())
            }
            Step::Confirm => Ok(()),
        }
    }
}

fn check_option<T: PreferenceOption>(raw: Option<&str>) -> Result<(), InvalidOption> {
    match raw.filter(|v| !v.trim().is_empty()) {
        Some(value) => T::parse(value).map(|_| ()),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Forward,
    Backward,
}

/// Every legal step change. Anything not listed is rejected.
const TRANSITIONS: &[(Step, Nav, Step)] = &[
    (Step::Context, Nav::Forward, Step::Identity),
    (Step::Identity, Nav::Forward, Step::Content),
    (Step::Content, Nav::Forward, Step::Confirm),
    (Step::Identity, Nav::Backward, Step::Context),
    (Step::Content, Nav::Backward, Step::Identity),
    (Step::Confirm, Nav::Backward, Step::Content),
];

fn transition(from: Step, nav: Nav) -> Option<Step> {
    TRANSITIONS
        .iter()
        .find(|(s, n, _)| *s == from && *n == nav)
        .map(|(_, _, to)| *to)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "post", rename_all = "snake_case")]
pub enum View {
    Form,
    Generating,
    Result(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Back,
    Submit,
    GenerationSucceeded(String),
    GenerationFailed,
    StartOver,
    OpenAuth,
    CloseAuth,
}

/// What the caller must do after an event.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Send this to the generation endpoint, then feed back the outcome.
    Generate(GenerationRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("topic cannot be empty")]
    TopicRequired,

    #[error("already at the first step")]
    AtFirstStep,

    #[error("already at the last step")]
    AtLastStep,

    #[error("a generation is already in progress")]
    AlreadyGenerating,

    #[error("{event} is not allowed while {view}")]
    NotAllowed {
        event: &'static str,
        view: &'static str,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Serializable view of the controller. Clients render it and send it back with
/// their next event; the server keeps no wizard state between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub step: Step,
    pub view: View,
    #[serde(default)]
    pub auth_open: bool,
    pub draft: RawPreferences,
    #[serde(default)]
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WizardController {
    step: Step,
    view: View,
    auth_open: bool,
    draft: RawPreferences,
    user_id: Option<Uuid>,
    notice: Option<String>,
}

impl WizardController {
    /// Selects the entry state from the current session and its saved profile.
    ///
    /// A signed-in user whose profile has saved defaults starts at Content with those
    /// defaults pre-filled; everyone else starts at Context with built-in defaults.
    pub fn enter(session: Option<&Session>, profile: Option<&ProfileRow>) -> Self {
        let user_id = session.map(|s| s.user_id);
        let saved = profile.filter(|p| session.is_some() && p.has_saved_defaults());

        let (step, draft) = match saved {
            Some(profile) => (Step::Content, profile.to_raw_preferences()),
            None => (Step::Context, Preferences::default().to_raw()),
        };

        Self {
            step,
            view: View::Form,
            auth_open: false,
            draft,
            user_id,
            notice: None,
        }
    }

    /// Rebuilds a controller from a client-held snapshot. Identity always comes from
    /// the verified session, never from the snapshot.
    pub fn restore(snapshot: WizardSnapshot, session: Option<&Session>) -> Self {
        let mut wizard = Self {
            step: snapshot.step,
            view: snapshot.view,
            auth_open: snapshot.auth_open,
            draft: snapshot.draft,
            user_id: None,
            notice: snapshot.notice,
        };
        wizard.set_session(session);
        wizard
    }

    #[allow(dead_code)]
    pub fn step(&self) -> Step {
        self.step
    }

    #[allow(dead_code)]
    pub fn view(&self) -> &View {
        &self.view
    }

    #[allow(dead_code)]
    pub fn auth_open(&self) -> bool {
        self.auth_open
    }

    #[allow(dead_code)]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[allow(dead_code)]
    pub fn draft(&self) -> &RawPreferences {
        &self.draft
    }

    /// Field edits are ignored while a generation is in flight.
    #[allow(dead_code)]
    pub fn draft_mut(&mut self) -> Option<&mut RawPreferences> {
        (self.view == View::Form).then_some(&mut self.draft)
    }

    #[allow(dead_code)]
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.topic = topic.into();
        }
    }

    /// Called when the user signs in or out while the wizard is open.
    pub fn set_session(&mut self, session: Option<&Session>) {
        self.user_id = session.map(|s| s.user_id);
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.step,
            view: self.view.clone(),
            auth_open: self.auth_open,
            draft: self.draft.clone(),
            notice: self.notice.clone(),
        }
    }

    pub fn handle(&mut self, event: WizardEvent) -> Result<Effect, WizardError> {
        match event {
            WizardEvent::OpenAuth => {
                self.auth_open = true;
                Ok(Effect::None)
            }
            WizardEvent::CloseAuth => {
                self.auth_open = false;
                Ok(Effect::None)
            }
            WizardEvent::Next => {
                self.require_form("next")?;
                self.check_topic_gate()?;
                self.step
                    .check_fields(&self.draft)
                    .map_err(|e| WizardError::Invalid(e.to_string()))?;
                self.step = transition(self.step, Nav::Forward).ok_or(WizardError::AtLastStep)?;
                self.notice = None;
                Ok(Effect::None)
            }
            WizardEvent::Back => {
                self.require_form("back")?;
                self.step =
                    transition(self.step, Nav::Backward).ok_or(WizardError::AtFirstStep)?;
                self.notice = None;
                Ok(Effect::None)
            }
            WizardEvent::Submit => self.submit(),
            WizardEvent::GenerationSucceeded(post) => {
                self.require_generating("generation result")?;
                self.view = View::Result(post);
                Ok(Effect::None)
            }
            WizardEvent::GenerationFailed => {
                self.require_generating("generation failure")?;
                self.view = View::Form;
                self.notice = Some(GENERATION_FAILED_NOTICE.to_string());
                Ok(Effect::None)
            }
            WizardEvent::StartOver => {
                if !matches!(self.view, View::Result(_)) {
                    return Err(self.not_allowed("start over"));
                }
                self.view = View::Form;
                self.step = Step::Context;
                self.draft.topic.clear();
                self.notice = None;
                Ok(Effect::None)
            }
        }
    }

    fn submit(&mut self) -> Result<Effect, WizardError> {
        if self.view == View::Generating {
            return Err(WizardError::AlreadyGenerating);
        }
        self.require_form("submit")?;
        if self.step != Step::Confirm {
            return Err(self.not_allowed("submit"));
        }
        self.check_topic_gate()?;

        let preferences = self
            .draft
            .validate()
            .map_err(|e| WizardError::Invalid(e.to_string()))?;

        self.view = View::Generating;
        self.notice = None;
        Ok(Effect::Generate(GenerationRequest {
            preferences,
            user_id: self.user_id,
        }))
    }

    fn check_topic_gate(&self) -> Result<(), WizardError> {
        if self.step.requires_topic() && self.draft.topic.trim().is_empty() {
            return Err(WizardError::TopicRequired);
        }
        Ok(())
    }

    fn require_form(&self, event: &'static str) -> Result<(), WizardError> {
        match self.view {
            View::Form => Ok(()),
            _ => Err(self.not_allowed(event)),
        }
    }

    fn require_generating(&self, event: &'static str) -> Result<(), WizardError> {
        match self.view {
            View::Generating => Ok(()),
            _ => Err(self.not_allowed(event)),
        }
    }

    fn not_allowed(&self, event: &'static str) -> WizardError {
        let view = match self.view {
            View::Form => "editing the form",
            View::Generating => "generating",
            View::Result(_) => "showing a result",
        };
        WizardError::NotAllowed { event, view }
    }
}
