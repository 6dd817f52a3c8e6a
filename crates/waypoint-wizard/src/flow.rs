//! Wizard flow state machine.

use serde::{Deserialize, Serialize};

use crate::data::{FieldUpdate, WizardData};
use crate::error::WizardError;
use crate::progress::Progress;
use crate::step::WizardStep;
use crate::validation::{validate_step, ValidationErrors};

/// Completed wizard data handed back by [`WizardFlow::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub data: WizardData,
}

impl Submission {
    /// Acknowledgment shown once the form is accepted.
    pub fn acknowledgment(&self) -> &'static str {
        "Form submitted successfully!"
    }
}

/// Wizard session state.
///
/// Owns the form data, the last validation result and the current step.
/// The session ends on [`submit`](Self::submit) or when the flow is dropped;
/// nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardFlow {
    data: WizardData,
    errors: ValidationErrors,
    step: WizardStep,
}

impl WizardFlow {
    /// Start a fresh session on step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on the step named by `path` (e.g. a deep link to `/wizard/step-2`).
    pub fn at_path(path: &str) -> Self {
        Self {
            step: WizardStep::from_path(path),
            ..Self::default()
        }
    }

    pub fn data(&self) -> &WizardData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Progress indicator for the current step.
    pub fn progress(&self) -> Progress {
        Progress::for_step(self.step)
    }

    /// Set a field and drop that field's error, if any. Other errors stay.
    pub fn update(&mut self, update: FieldUpdate) {
        let field = update.field();
        self.data.apply(update);
        if self.errors.clear(field).is_some() {
            tracing::trace!(field = %field, "cleared field error");
        }
    }

    /// Check `step` against the current data without touching stored errors.
    pub fn validate(&self, step: WizardStep) -> ValidationErrors {
        validate_step(step, &self.data)
    }

    /// Re-validate the current step, replacing the stored errors.
    ///
    /// Returns `true` if the step is valid.
    pub fn validate_current(&mut self) -> bool {
        self.errors = self.validate(self.step);
        self.errors.is_empty()
    }

    /// Move to the next step if the current one validates.
    ///
    /// On refusal the step is unchanged and the stored errors describe why.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::NoNextStep(self.step))?;

        if !self.validate_current() {
            tracing::debug!(step = %self.step, errors = %self.errors, "wizard advance blocked");
            return Err(WizardError::Invalid {
                step: self.step,
                errors: self.errors.clone(),
            });
        }

        tracing::debug!(from = %self.step, to = %next, "wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Move to the previous step. Never validates.
    pub fn go_back(&mut self) -> Result<WizardStep, WizardError> {
        let prev = self
            .step
            .previous()
            .ok_or(WizardError::NoPreviousStep(self.step))?;

        tracing::debug!(from = %self.step, to = %prev, "wizard went back");
        self.step = prev;
        Ok(prev)
    }

    /// Follow the location after browser back/forward.
    ///
    /// Like the path-derived step, this does not validate.
    pub fn sync_to_path(&mut self, path: &str) -> WizardStep {
        let step = WizardStep::from_path(path);
        if step != self.step {
            tracing::debug!(from = %self.step, to = %step, path, "wizard step resynced");
            self.step = step;
        }
        step
    }

    /// Submit from the final step.
    ///
    /// Re-validates the final step only. On success the session is reset and
    /// the collected data is handed back once.
    pub fn submit(&mut self) -> Result<Submission, WizardError> {
        if !self.step.is_last() {
            return Err(WizardError::NotOnFinalStep(self.step));
        }

        if !self.validate_current() {
            return Err(WizardError::Invalid {
                step: self.step,
                errors: self.errors.clone(),
            });
        }

        let finished = std::mem::take(self);
        tracing::info!(plan = ?finished.data.plan, "wizard submitted");
        Ok(Submission {
            data: finished.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Field, Plan};
    use crate::error::FieldError;

    fn filled_flow() -> WizardFlow {
        let mut flow = WizardFlow::new();
        flow.update(FieldUpdate::Name("Ann".into()));
        flow.update(FieldUpdate::Email("a@b.co".into()));
        flow
    }

    // === Creation Tests ===

    #[test]
    fn test_flow_creation() {
        let flow = WizardFlow::new();
        assert_eq!(flow.step(), WizardStep::Details);
        assert!(flow.errors().is_empty());
        assert_eq!(flow.data(), &WizardData::default());
    }

    #[test]
    fn test_flow_at_path() {
        assert_eq!(WizardFlow::at_path("/wizard/step-3").step(), WizardStep::Confirm);
        assert_eq!(WizardFlow::at_path("/wizard/nope").step(), WizardStep::Details);
    }

    // === Advance Tests ===

    #[test]
    fn test_advance_blocked_on_empty_data() {
        let mut flow = WizardFlow::new();

        let err = flow.advance().unwrap_err();
        assert_eq!(flow.step(), WizardStep::Details);
        assert!(flow.errors().contains(Field::Name));
        assert!(flow.errors().contains(Field::Email));
        assert_eq!(err.validation_errors(), Some(flow.errors()));
    }

    #[test]
    fn test_advance_end_to_end() {
        let mut flow = WizardFlow::new();
        assert!(flow.advance().is_err());

        flow.update(FieldUpdate::Name("Ann".into()));
        flow.update(FieldUpdate::Email("a@b.co".into()));

        assert_eq!(flow.advance().unwrap(), WizardStep::Plan);
        assert_eq!(flow.step(), WizardStep::Plan);
        assert!(flow.errors().is_empty());
    }

    #[test]
    fn test_advance_blocked_is_noop_for_every_step() {
        let mut flow = filled_flow();
        flow.advance().unwrap();

        flow.update(FieldUpdate::Plan(None));
        assert!(flow.advance().is_err());
        assert_eq!(flow.step(), WizardStep::Plan);
        assert_eq!(flow.errors().get(Field::Plan), Some(FieldError::PlanRequired));
    }

    #[test]
    fn test_advance_replaces_errors_wholesale() {
        let mut flow = WizardFlow::new();
        flow.advance().unwrap_err();
        assert_eq!(flow.errors().len(), 2);

        flow.update(FieldUpdate::Name("Ann".into()));
        flow.update(FieldUpdate::Email("bad".into()));
        flow.advance().unwrap_err();

        assert_eq!(flow.errors().len(), 1);
        assert_eq!(flow.errors().get(Field::Email), Some(FieldError::EmailInvalid));
    }

    #[test]
    fn test_advance_past_last_step() {
        let mut flow = WizardFlow::at_path("step-3");
        assert_eq!(
            flow.advance(),
            Err(WizardError::NoNextStep(WizardStep::Confirm))
        );
    }

    // === Update Tests ===

    #[test]
    fn test_update_clears_only_its_field() {
        let mut flow = WizardFlow::new();
        flow.advance().unwrap_err();

        flow.update(FieldUpdate::Name("A".into()));
        assert!(!flow.errors().contains(Field::Name));
        assert!(flow.errors().contains(Field::Email));
        assert_eq!(flow.data().name, "A");
    }

    #[test]
    fn test_update_without_error_is_harmless() {
        let mut flow = WizardFlow::new();
        flow.update(FieldUpdate::AgreeTerms(true));
        assert!(flow.errors().is_empty());
        assert!(flow.data().agree_terms);
    }

    // === Go Back Tests ===

    #[test]
    fn test_go_back_never_validates() {
        let mut flow = WizardFlow::at_path("/wizard/step-3");
        // Step 3 data is invalid (terms unchecked) and so is step 2's
        flow.update(FieldUpdate::Plan(None));

        assert_eq!(flow.go_back().unwrap(), WizardStep::Plan);
        assert!(flow.errors().is_empty());
        assert_eq!(flow.go_back().unwrap(), WizardStep::Details);
    }

    #[test]
    fn test_go_back_from_first_step() {
        let mut flow = WizardFlow::new();
        assert_eq!(
            flow.go_back(),
            Err(WizardError::NoPreviousStep(WizardStep::Details))
        );
    }

    #[test]
    fn test_go_back_keeps_errors() {
        let mut flow = filled_flow();
        flow.advance().unwrap();
        flow.update(FieldUpdate::Plan(None));
        flow.advance().unwrap_err();

        flow.go_back().unwrap();
        assert!(flow.errors().contains(Field::Plan));
    }

    // === Path Sync Tests ===

    #[test]
    fn test_sync_to_path() {
        let mut flow = WizardFlow::new();
        assert_eq!(flow.sync_to_path("/wizard/step-2"), WizardStep::Plan);
        assert_eq!(flow.step(), WizardStep::Plan);
        assert_eq!(flow.sync_to_path("/wizard"), WizardStep::Details);
    }

    // === Submit Tests ===

    #[test]
    fn test_submit_requires_final_step() {
        let mut flow = filled_flow();
        assert_eq!(
            flow.submit(),
            Err(WizardError::NotOnFinalStep(WizardStep::Details))
        );
    }

    #[test]
    fn test_submit_requires_terms() {
        let mut flow = filled_flow();
        flow.advance().unwrap();
        flow.advance().unwrap();

        let err = flow.submit().unwrap_err();
        assert!(matches!(err, WizardError::Invalid { step: WizardStep::Confirm, .. }));
        assert_eq!(flow.step(), WizardStep::Confirm);
        assert!(flow.errors().contains(Field::AgreeTerms));
    }

    #[test]
    fn test_submit_only_checks_final_step() {
        // Reached step 3 by deep link with empty step 1 data
        let mut flow = WizardFlow::at_path("/wizard/step-3");
        flow.update(FieldUpdate::AgreeTerms(true));
        assert!(flow.submit().is_ok());
    }

    #[test]
    fn test_submit_discards_session() {
        let mut flow = filled_flow();
        flow.advance().unwrap();
        flow.update(FieldUpdate::Plan(Some(Plan::Premium)));
        flow.advance().unwrap();
        flow.update(FieldUpdate::AgreeTerms(true));

        let submission = flow.submit().unwrap();
        assert_eq!(submission.data.name, "Ann");
        assert_eq!(submission.data.plan, Some(Plan::Premium));
        assert_eq!(submission.acknowledgment(), "Form submitted successfully!");

        assert_eq!(flow, WizardFlow::new());
    }

    // === Progress Tests ===

    #[test]
    fn test_progress_follows_step() {
        let mut flow = filled_flow();
        assert_eq!(flow.progress().width_css(), "0%");
        flow.advance().unwrap();
        assert_eq!(flow.progress().width_css(), "40%");
        flow.advance().unwrap();
        assert_eq!(flow.progress().width_css(), "80%");
    }
}
