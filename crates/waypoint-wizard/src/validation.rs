//! Per-step validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::{Field, WizardData};
use crate::error::FieldError;
use crate::step::WizardStep;

/// Field-keyed validation result. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Remove one field's entry, returning it if present.
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Message to render under a field's input, if any.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

impl FromIterator<(Field, FieldError)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (Field, FieldError)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Loose address check: somewhere in the input, `x@y.z` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Check one step's fields. Pure function of `step` and `data`.
pub fn validate_step(step: WizardStep, data: &WizardData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match step {
        WizardStep::Details => {
            if data.name.trim().is_empty() {
                errors.insert(Field::Name, FieldError::NameRequired);
            }

            if data.email.trim().is_empty() {
                errors.insert(Field::Email, FieldError::EmailRequired);
            } else if !is_valid_email(&data.email) {
                errors.insert(Field::Email, FieldError::EmailInvalid);
            }
        }
        WizardStep::Plan => {
            if data.plan.is_none() {
                errors.insert(Field::Plan, FieldError::PlanRequired);
            }
        }
        WizardStep::Confirm => {
            if !data.agree_terms {
                errors.insert(Field::AgreeTerms, FieldError::TermsNotAccepted);
            }
        }
    }

    errors
}
