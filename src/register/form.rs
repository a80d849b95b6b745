//! Registration form data and the account-creation request body.

use serde::{Deserialize, Serialize};

/// One of the four text inputs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    Phone,
    Username,
    Password,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
            Self::Username => write!(f, "username"),
            Self::Password => write!(f, "password"),
        }
    }
}

/// Values held for one registration attempt.
///
/// Strings are stored exactly as typed; nothing is trimmed or normalized.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password: String,
    pub terms_agreed: bool,
}

impl RegistrationForm {
    /// Replace the value of a single field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Username => self.username = value,
            Field::Password => self.password = value,
        }
    }

    /// Current value of a single field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    /// Build the request body from the current values.
    pub fn to_new_account(&self) -> NewAccount {
        NewAccount {
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
        }
    }
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("terms_agreed", &self.terms_agreed)
            .finish()
    }
}

/// JSON body of the account-creation request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
