//! Registration stage machine — which part of the form is interactive.

use serde::{Deserialize, Serialize};

/// The visible configuration of the registration form.
///
/// Progresses: Collecting → Expanded ⇄ TermsReview, Expanded → Submitting →
/// Submitted. A failed submission drops back from Submitting to Expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Only the email input is interactive.
    Collecting,
    /// Every input is interactive, terms overlay hidden.
    Expanded,
    /// Terms overlay shown; the form underneath keeps its values.
    TermsReview,
    /// An account-creation request is outstanding.
    Submitting,
    /// Account created, navigated away.
    Submitted,
}

impl Stage {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Collecting, Expanded)
                | (Expanded, TermsReview)
                | (TermsReview, Expanded)
                | (Expanded, Submitting)
                | (Submitting, Expanded)
                | (Submitting, Submitted)
        )
    }

    /// Whether this stage is terminal (the flow is over).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Whether the given field accepts edits in this stage.
    pub fn accepts_edit(&self, field: super::Field) -> bool {
        match self {
            Self::Collecting => field == super::Field::Email,
            Self::Expanded | Self::Submitting => true,
            Self::TermsReview | Self::Submitted => false,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Collecting
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Collecting => "collecting",
            Self::Expanded => "expanded",
            Self::TermsReview => "terms_review",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}
