use std::time::Duration;

use serde::Serialize;

use super::validation::FieldErrors;
use crate::marketplace::site::SiteRoute;

/// A draft that can be checked against its field rules.
pub trait Validate {
    /// Structured record produced when every rule holds.
    type Accepted;

    fn validate(&self) -> Result<Self::Accepted, FieldErrors>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    #[default]
    Editing,
    Validating,
    Submitted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),
    #[error("form was already submitted")]
    AlreadySubmitted,
}

/// Validate-then-submit state machine shared by every form.
///
/// `Editing -> Validating -> Submitted | Rejected`; a rejected form may be edited and
/// submitted again, a submitted one may not.
#[derive(Debug, Clone, Default)]
pub struct FormFlow {
    state: FormState,
    errors: FieldErrors,
    attempts: u32,
}

impl FormFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Inline messages from the last rejected attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Return a rejected form to editing. Messages stay visible until the next submit.
    pub fn edit(&mut self) {
        if self.state == FormState::Rejected {
            self.state = FormState::Editing;
        }
    }

    /// Reopen a submitted form after the backend refused the accepted record.
    pub fn reopen(&mut self) {
        if self.state == FormState::Submitted {
            self.state = FormState::Editing;
        }
    }

    pub fn submit<D: Validate>(&mut self, draft: &D) -> Result<D::Accepted, FormError> {
        if self.state == FormState::Submitted {
            return Err(FormError::AlreadySubmitted);
        }

        self.attempts += 1;
        self.state = FormState::Validating;
        match draft.validate() {
            Ok(accepted) => {
                self.errors = FieldErrors::new();
                self.state = FormState::Submitted;
                Ok(accepted)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.state = FormState::Rejected;
                Err(FormError::Invalid(errors))
            }
        }
    }
}

/// Toast-style message shown after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

/// Delay between a successful submit and the follow-up navigation.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Success signal for an accepted form: the record, a notice, and where to go next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission<T> {
    pub record: T,
    pub notice: Notice,
    pub redirect: SiteRoute,
    pub redirect_after_ms: u64,
}

impl<T> Submission<T> {
    pub fn new(record: T, notice: Notice, redirect: SiteRoute) -> Self {
        Self {
            record,
            notice,
            redirect,
            redirect_after_ms: REDIRECT_DELAY.as_millis() as u64,
        }
    }
}
