//! Wizard error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::WizardStep;
use crate::validation::ValidationErrors;

/// A problem with a single field, displayed next to its input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Name is empty or whitespace.
    #[error("Please enter your name")]
    NameRequired,

    /// Email is empty or whitespace.
    #[error("Please enter your email address")]
    EmailRequired,

    /// Email does not look like an address.
    #[error("Please enter a valid email address")]
    EmailInvalid,

    /// No plan selected.
    #[error("Please choose a plan")]
    PlanRequired,

    /// Terms checkbox left unticked.
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,
}

/// Errors returned by wizard transitions.
///
/// A refused transition never changes the current step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    /// The current step has validation errors.
    #[error("Step {step} is incomplete: {errors}")]
    Invalid {
        step: WizardStep,
        errors: ValidationErrors,
    },

    /// Already on the last step; use submit instead.
    #[error("No step after {0}")]
    NoNextStep(WizardStep),

    /// Already on the first step.
    #[error("No step before {0}")]
    NoPreviousStep(WizardStep),

    /// Submission is only possible from the confirmation step.
    #[error("Cannot submit from {0}")]
    NotOnFinalStep(WizardStep),
}

impl WizardError {
    /// Validation errors carried by an [`WizardError::Invalid`] refusal.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            WizardError::Invalid { errors, .. } => Some(errors),
            _ => None,
        }
    }
}
