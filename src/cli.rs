//! Terminal front-end — maps typed commands to form events and renders the
//! session as text.

use crate::register::{
    Event, Field, RegistrationSession, Stage, TERMS_CHECKBOX_LABEL, TERMS_TEXT,
};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type into an input, replacing its value.
    Edit { field: Field, value: String },
    /// Press Enter inside an input.
    Enter(Field),
    GetStarted,
    ShowTerms,
    ToggleTerms,
    Back,
    SignUp,
    Hours,
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// Parses user input into Commands.
pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\r', '\n']);
        let (head, rest) = match line.split_once(' ') {
            Some((head, rest)) => (head, Some(rest)),
            None => (line, None),
        };

        if let Some(field) = parse_field(head) {
            return Command::Edit {
                field,
                value: rest.unwrap_or_default().to_string(),
            };
        }

        match (head.to_lowercase().as_str(), rest.map(str::trim)) {
            ("enter", Some(target)) => match parse_field(target) {
                Some(field) => Command::Enter(field),
                None => Command::Unknown(line.to_string()),
            },
            ("start" | "get-started", None) => Command::GetStarted,
            ("terms", None) => Command::ShowTerms,
            ("agree" | "check", None) => Command::ToggleTerms,
            ("back", None) => Command::Back,
            ("signup" | "submit", None) => Command::SignUp,
            ("hours", None) => Command::Hours,
            ("status" | "show", None) => Command::Status,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

fn parse_field(word: &str) -> Option<Field> {
    match word.to_lowercase().as_str() {
        "email" => Some(Field::Email),
        "phone" => Some(Field::Phone),
        "username" => Some(Field::Username),
        "password" => Some(Field::Password),
        _ => None,
    }
}

impl Command {
    /// The form event this command dispatches in `stage`, if any.
    pub fn to_event(&self, stage: Stage) -> Option<Event> {
        match self {
            Self::Edit { field, value } => Some(Event::edit(*field, value.clone())),
            // Email and phone share the "get started" handler; username and
            // password submit directly.
            Self::Enter(Field::Email | Field::Phone) | Self::GetStarted => {
                Some(Event::get_started_for(stage))
            }
            Self::Enter(Field::Username | Field::Password) | Self::SignUp => {
                Some(Event::SubmitRequested)
            }
            Self::ShowTerms => Some(Event::TermsButtonRequested),
            Self::ToggleTerms => Some(Event::TermsCheckboxToggled),
            Self::Back => Some(Event::BackRequested),
            Self::Hours | Self::Status | Self::Help | Self::Quit | Self::Unknown(_) => None,
        }
    }
}

pub const HELP: &str = "\
Commands:
  email|phone|username|password <value>   type into an input
  enter <field>                           press Enter inside an input
  start                                   press \"Get Started\"
  terms                                   open the terms overlay
  agree                                   toggle the terms checkbox
  back                                    close the terms overlay
  signup                                  press \"Sign Up\"
  hours                                   show opening hours
  status                                  show the form
  quit";

/// Render what the form currently shows.
pub fn render(session: &RegistrationSession) -> String {
    let form = &session.form;
    let mut lines = Vec::new();

    match session.stage {
        Stage::TermsReview => {
            lines.push("Terms and Conditions".to_string());
            lines.push(format!("  {TERMS_TEXT}"));
            let mark = if form.terms_agreed { "x" } else { " " };
            lines.push(format!("  [{mark}] {TERMS_CHECKBOX_LABEL}"));
            lines.push("  (back)".to_string());
        }
        Stage::Submitted => lines.push("Account created.".to_string()),
        stage => {
            lines.push("Sign up for free.".to_string());
            lines.push(format!("  email:    {}", form.get(Field::Email)));
            if stage == Stage::Collecting {
                lines.push("  (start)".to_string());
            } else {
                for field in [Field::Phone, Field::Username] {
                    lines.push(format!("  {:<9} {}", format!("{field}:"), form.get(field)));
                }
                let masked = "*".repeat(form.get(Field::Password).chars().count());
                lines.push(format!("  password: {masked}"));
                lines.push("  (terms) (signup)".to_string());
            }
            if stage == Stage::Submitting {
                lines.push("  Registering...".to_string());
            }
        }
    }

    // The message sits under the form, which the terms overlay hides.
    if let (Some(error), false) = (&session.error, session.stage == Stage::TermsReview) {
        lines.push(format!("! {error}"));
    }

    lines.join("\n")
}
