//! Registration session — the explicit state record and its reducer.
//!
//! `RegistrationSession::handle` is a pure transition: it mutates the record
//! and returns the side effects the caller must perform. Nothing in here
//! touches the network or the router.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::{Field, NewAccount, RegistrationForm};
use super::messages::MessageCatalog;
use super::stage::Stage;
use super::submitter::SubmissionOutcome;
use super::validation::Validator;

/// User (or system) events that drive the session.
#[derive(Clone, PartialEq, Eq)]
pub enum Event {
    FieldEdited { field: Field, value: String },
    GetStartedRequested,
    TermsButtonRequested,
    BackRequested,
    TermsCheckboxToggled,
    SubmitRequested,
    /// The outstanding account-creation call finished.
    SubmissionResolved(SubmissionOutcome),
}

impl Event {
    /// The event the "get started" control dispatches in `stage`.
    ///
    /// Before expansion it advances the form; afterwards the same control
    /// submits it.
    pub fn get_started_for(stage: Stage) -> Self {
        match stage {
            Stage::Collecting => Self::GetStartedRequested,
            _ => Self::SubmitRequested,
        }
    }

    pub fn edit(field: Field, value: impl Into<String>) -> Self {
        Self::FieldEdited {
            field,
            value: value.into(),
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldEdited {
                field: Field::Password,
                ..
            } => f
                .debug_struct("FieldEdited")
                .field("field", &Field::Password)
                .field("value", &"[REDACTED]")
                .finish(),
            Self::FieldEdited { field, value } => f
                .debug_struct("FieldEdited")
                .field("field", field)
                .field("value", value)
                .finish(),
            Self::GetStartedRequested => write!(f, "GetStartedRequested"),
            Self::TermsButtonRequested => write!(f, "TermsButtonRequested"),
            Self::BackRequested => write!(f, "BackRequested"),
            Self::TermsCheckboxToggled => write!(f, "TermsCheckboxToggled"),
            Self::SubmitRequested => write!(f, "SubmitRequested"),
            Self::SubmissionResolved(outcome) => {
                f.debug_tuple("SubmissionResolved").field(outcome).finish()
            }
        }
    }
}

/// Named navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    SignIn,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignIn => write!(f, "sign_in"),
        }
    }
}

/// A navigation request with the state handed to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub route: Route,
    pub just_registered: bool,
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CreateAccount(NewAccount),
    Navigate(Navigation),
}

/// Validation thresholds and message text used by the reducer.
#[derive(Debug, Clone, Default)]
pub struct FormRules {
    pub validator: Validator,
    pub messages: MessageCatalog,
}

/// Everything the registration page holds for one attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub form: RegistrationForm,
    pub stage: Stage,
    /// Message currently displayed under the form, if any.
    pub error: Option<String>,
}

impl Default for RegistrationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            form: RegistrationForm::default(),
            stage: Stage::default(),
            error: None,
        }
    }

    /// Apply one event and return the effects it requests.
    pub fn handle(&mut self, event: Event, rules: &FormRules) -> Vec<Effect> {
        if self.stage.is_terminal() {
            tracing::debug!(session = %self.id, ?event, "Ignoring event after submission");
            return Vec::new();
        }

        match (self.stage, event) {
            (stage, Event::FieldEdited { field, value }) => {
                if stage.accepts_edit(field) {
                    self.form.set(field, value);
                } else {
                    tracing::debug!(session = %self.id, %field, %stage, "Edit ignored");
                }
                Vec::new()
            }

            (Stage::Collecting, Event::GetStartedRequested) => {
                if !self.form.email.is_empty() {
                    self.transition(Stage::Expanded);
                }
                Vec::new()
            }
            (Stage::Expanded, Event::GetStartedRequested | Event::SubmitRequested) => {
                self.submit(rules)
            }

            (Stage::Expanded, Event::TermsButtonRequested) => {
                self.transition(Stage::TermsReview);
                Vec::new()
            }
            (Stage::TermsReview, Event::BackRequested) => {
                self.transition(Stage::Expanded);
                Vec::new()
            }
            (Stage::TermsReview, Event::TermsCheckboxToggled) => {
                self.form.terms_agreed = !self.form.terms_agreed;
                Vec::new()
            }

            (Stage::Submitting, Event::SubmissionResolved(outcome)) => {
                self.resolve(outcome, rules)
            }

            (stage, event) => {
                tracing::debug!(session = %self.id, ?event, %stage, "Event has no effect in this stage");
                Vec::new()
            }
        }
    }

    fn submit(&mut self, rules: &FormRules) -> Vec<Effect> {
        self.error = None;

        if let Err(kind) = rules.validator.validate(&self.form) {
            tracing::debug!(session = %self.id, %kind, "Registration form rejected");
            self.error = Some(rules.messages.validation_message(kind, &rules.validator));
            return Vec::new();
        }

        self.transition(Stage::Submitting);
        vec![Effect::CreateAccount(self.form.to_new_account())]
    }

    fn resolve(&mut self, outcome: SubmissionOutcome, rules: &FormRules) -> Vec<Effect> {
        match outcome {
            SubmissionOutcome::Success => {
                self.transition(Stage::Submitted);
                vec![Effect::Navigate(Navigation {
                    route: Route::SignIn,
                    just_registered: true,
                })]
            }
            SubmissionOutcome::Failure(kind) => {
                self.error = Some(rules.messages.submission_message(kind));
                self.transition(Stage::Expanded);
                Vec::new()
            }
        }
    }

    fn transition(&mut self, target: Stage) {
        debug_assert!(
            self.stage.can_transition_to(target),
            "illegal transition {} -> {}",
            self.stage,
            target
        );
        tracing::debug!(session = %self.id, from = %self.stage, to = %target, "Stage transition");
        self.stage = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::submitter::SubmissionFailure;
    use crate::register::validation::MIN_PASSWORD_LENGTH;

    fn rules() -> FormRules {
        FormRules::default()
    }

    fn expanded_session() -> RegistrationSession {
        let mut session = RegistrationSession::new();
        session.handle(Event::edit(Field::Email, "student@purdue.edu"), &rules());
        session.handle(Event::GetStartedRequested, &rules());
        assert_eq!(session.stage, Stage::Expanded);
        session
    }

    fn filled_session() -> RegistrationSession {
        let mut session = expanded_session();
        let r = rules();
        session.handle(Event::edit(Field::Phone, "765-494-3000"), &r);
        session.handle(Event::edit(Field::Username, "boilermaker"), &r);
        session.handle(Event::edit(Field::Password, "correct horse"), &r);
        session.handle(Event::TermsButtonRequested, &r);
        session.handle(Event::TermsCheckboxToggled, &r);
        session.handle(Event::BackRequested, &r);
        session
    }

    #[test]
    fn starts_collecting_with_empty_form() {
        let session = RegistrationSession::new();
        assert_eq!(session.stage, Stage::Collecting);
        assert_eq!(session.form, RegistrationForm::default());
        assert!(session.error.is_none());
    }

    #[test]
    fn get_started_with_empty_email_is_noop() {
        let mut session = RegistrationSession::new();
        let effects = session.handle(Event::GetStartedRequested, &rules());
        assert!(effects.is_empty());
        assert_eq!(session.stage, Stage::Collecting);
    }

    #[test]
    fn get_started_with_email_expands() {
        let session = expanded_session();
        assert!(session.error.is_none());
    }

    #[test]
    fn get_started_does_not_validate_email_format() {
        let mut session = RegistrationSession::new();
        session.handle(Event::edit(Field::Email, "x"), &rules());
        session.handle(Event::GetStartedRequested, &rules());
        assert_eq!(session.stage, Stage::Expanded);
    }

    #[test]
    fn hidden_inputs_ignore_edits_and_enter_while_collecting() {
        let mut session = RegistrationSession::new();
        session.handle(Event::edit(Field::Username, "sneaky"), &rules());
        assert!(session.form.username.is_empty());

        let effects = session.handle(Event::SubmitRequested, &rules());
        assert!(effects.is_empty());
        assert_eq!(session.stage, Stage::Collecting);
        assert!(session.error.is_none());
    }

    #[test]
    fn get_started_for_picks_event_by_stage() {
        assert_eq!(Event::get_started_for(Stage::Collecting), Event::GetStartedRequested);
        assert_eq!(Event::get_started_for(Stage::Expanded), Event::SubmitRequested);
    }

    #[test]
    fn get_started_when_expanded_submits() {
        let mut session = expanded_session();
        session.handle(Event::GetStartedRequested, &rules());
        // phone is still empty
        assert_eq!(session.error.as_deref(), Some("Invalid phone format."));
        assert_eq!(session.stage, Stage::Expanded);
    }

    #[test]
    fn terms_review_round_trip_keeps_values() {
        let mut session = expanded_session();
        let r = rules();
        session.handle(Event::edit(Field::Phone, "765-494-3000"), &r);
        session.handle(Event::edit(Field::Password, "pw"), &r);
        let before = session.form.clone();

        session.handle(Event::TermsButtonRequested, &r);
        assert_eq!(session.stage, Stage::TermsReview);
        session.handle(Event::BackRequested, &r);

        assert_eq!(session.stage, Stage::Expanded);
        assert_eq!(session.form, before);
        assert!(!session.form.terms_agreed);
    }

    #[test]
    fn checkbox_toggles_only_in_terms_review() {
        let mut session = expanded_session();
        let r = rules();
        session.handle(Event::TermsCheckboxToggled, &r);
        assert!(!session.form.terms_agreed);

        session.handle(Event::TermsButtonRequested, &r);
        session.handle(Event::TermsCheckboxToggled, &r);
        assert!(session.form.terms_agreed);
        session.handle(Event::TermsCheckboxToggled, &r);
        assert!(!session.form.terms_agreed);
        session.handle(Event::TermsCheckboxToggled, &r);
        session.handle(Event::BackRequested, &r);
        assert!(session.form.terms_agreed);
    }

    #[test]
    fn form_is_frozen_during_terms_review() {
        let mut session = expanded_session();
        session.handle(Event::TermsButtonRequested, &rules());
        session.handle(Event::edit(Field::Email, "other@x.io"), &rules());
        assert_eq!(session.form.email, "student@purdue.edu");
        let effects = session.handle(Event::SubmitRequested, &rules());
        assert!(effects.is_empty());
        assert_eq!(session.stage, Stage::TermsReview);
    }

    #[test]
    fn terms_not_agreed_blocks_request() {
        let mut session = filled_session();
        session.handle(Event::TermsButtonRequested, &rules());
        session.handle(Event::TermsCheckboxToggled, &rules());
        session.handle(Event::BackRequested, &rules());
        assert!(!session.form.terms_agreed);

        let effects = session.handle(Event::SubmitRequested, &rules());
        assert!(effects.is_empty());
        assert_eq!(session.stage, Stage::Expanded);
        assert_eq!(
            session.error.as_deref(),
            Some("You must agree to the terms and conditions before registering.")
        );
    }

    #[test]
    fn short_password_message_names_minimum() {
        let mut session = filled_session();
        session.handle(Event::edit(Field::Password, "short"), &rules());
        session.handle(Event::SubmitRequested, &rules());
        assert_eq!(
            session.error,
            Some(format!("Invalid password. The length must be at least {MIN_PASSWORD_LENGTH}."))
        );
    }

    #[test]
    fn valid_submit_requests_account_creation() {
        let mut session = filled_session();
        let effects = session.handle(Event::SubmitRequested, &rules());
        assert_eq!(session.stage, Stage::Submitting);
        assert_eq!(
            effects,
            vec![Effect::CreateAccount(NewAccount {
                username: "boilermaker".into(),
                email: "student@purdue.edu".into(),
                phone: "765-494-3000".into(),
                password: "correct horse".into(),
            })]
        );
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut session = filled_session();
        assert_eq!(session.handle(Event::SubmitRequested, &rules()).len(), 1);
        assert!(session.handle(Event::SubmitRequested, &rules()).is_empty());
        assert!(session.handle(Event::GetStartedRequested, &rules()).is_empty());
        assert_eq!(session.stage, Stage::Submitting);
    }

    #[test]
    fn resubmit_clears_previous_error() {
        let mut session = filled_session();
        session.error = Some("stale".into());
        session.handle(Event::SubmitRequested, &rules());
        assert!(session.error.is_none());
    }

    #[test]
    fn success_navigates_to_sign_in() {
        let mut session = filled_session();
        session.handle(Event::SubmitRequested, &rules());
        let effects = session.handle(
            Event::SubmissionResolved(SubmissionOutcome::Success),
            &rules(),
        );
        assert_eq!(session.stage, Stage::Submitted);
        assert!(session.error.is_none());
        assert_eq!(
            effects,
            vec![Effect::Navigate(Navigation {
                route: Route::SignIn,
                just_registered: true,
            })]
        );
    }

    #[test]
    fn conflict_returns_to_expanded_with_message() {
        let mut session = filled_session();
        session.handle(Event::SubmitRequested, &rules());
        let before = session.form.clone();
        let effects = session.handle(
            Event::SubmissionResolved(SubmissionOutcome::Failure(SubmissionFailure::Conflict)),
            &rules(),
        );
        assert!(effects.is_empty());
        assert_eq!(session.stage, Stage::Expanded);
        assert_eq!(
            session.error.as_deref(),
            Some("Email, phone number, or username already taken.")
        );
        assert_eq!(session.form, before);
    }

    #[test]
    fn generic_failure_allows_retry() {
        let mut session = filled_session();
        session.handle(Event::SubmitRequested, &rules());
        session.handle(
            Event::SubmissionResolved(SubmissionOutcome::Failure(SubmissionFailure::Generic)),
            &rules(),
        );
        assert_eq!(session.stage, Stage::Expanded);
        assert!(session.error.as_deref().unwrap().contains("try again later"));

        let effects = session.handle(Event::SubmitRequested, &rules());
        assert_eq!(effects.len(), 1);
        assert!(session.error.is_none());
    }

    #[test]
    fn stray_resolution_is_ignored() {
        let mut session = expanded_session();
        let effects = session.handle(
            Event::SubmissionResolved(SubmissionOutcome::Success),
            &rules(),
        );
        assert!(effects.is_empty());
        assert_eq!(session.stage, Stage::Expanded);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut session = filled_session();
        session.handle(Event::SubmitRequested, &rules());
        session.handle(Event::SubmissionResolved(SubmissionOutcome::Success), &rules());

        for event in [
            Event::SubmitRequested,
            Event::GetStartedRequested,
            Event::TermsButtonRequested,
            Event::edit(Field::Email, "changed@x.io"),
        ] {
            assert!(session.handle(event, &rules()).is_empty());
        }
        assert_eq!(session.stage, Stage::Submitted);
        assert_eq!(session.form.email, "student@purdue.edu");
    }

    #[test]
    fn password_edits_are_redacted_after_submission() {
        let mut session = filled_session();
        session.handle(Event::SubmitRequested, &rules());
        session.handle(Event::SubmissionResolved(SubmissionOutcome::Success), &rules());

        let event = Event::edit(Field::Password, "hunter2-SECRET");
        let debug = format!("{event:?}");
        assert!(!debug.contains("hunter2-SECRET"), "password leaked: {debug}");
        assert!(debug.contains("[REDACTED]"));
        assert!(session.handle(event, &rules()).is_empty());
    }

    #[test]
    fn other_edits_keep_their_value_in_debug() {
        let debug = format!("{:?}", Event::edit(Field::Username, "boilermaker"));
        assert!(debug.contains("boilermaker"));
        assert_eq!(format!("{:?}", Event::BackRequested), "BackRequested");
    }

    #[test]
    fn session_serde_roundtrip() {
        let mut session = filled_session();
        session.error = Some("Invalid phone format.".into());
        let json = serde_json::to_string(&session).unwrap();
        let parsed: RegistrationSession = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, session.id);
        assert_eq!(parsed.stage, Stage::Expanded);
        assert_eq!(parsed.form, session.form);
        assert_eq!(parsed.error, session.error);
    }
}
