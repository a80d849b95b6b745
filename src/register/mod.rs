//! Registration flow — progressive-disclosure signup form.
//!
//! The form starts with only the email input. "Get started" expands it to
//! phone, username and password; a terms overlay gates submission. On submit
//! the fields are validated in a fixed order and, if all pass, sent to the
//! account-creation endpoint. The endpoint's answer becomes either a
//! navigation to sign-in or a message under the form.

pub mod flow;
pub mod form;
pub mod messages;
pub mod session;
pub mod stage;
pub mod submitter;
pub mod validation;

pub use flow::{Navigator, RegistrationFlow};
pub use form::{Field, NewAccount, RegistrationForm};
pub use messages::{MessageCatalog, TERMS_CHECKBOX_LABEL, TERMS_TEXT};
pub use session::{Effect, Event, FormRules, Navigation, RegistrationSession, Route};
pub use stage::Stage;
pub use submitter::{AccountApi, HttpAccountApi, SubmissionFailure, SubmissionOutcome};
pub use validation::{
    MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, ValidationError, ValidationOutcome, Validator,
};
