//! Wizard steps and their sub-paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Field;

/// Number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 3;

/// Steps in the wizard flow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Name and email.
    #[default]
    Details,
    /// Plan selection.
    Plan,
    /// Summary and terms.
    Confirm,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [WizardStep; 3] = [WizardStep::Details, WizardStep::Plan, WizardStep::Confirm];

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Plan => 2,
            WizardStep::Confirm => 3,
        }
    }

    /// Look up a step by its 1-indexed number.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::Details),
            2 => Some(WizardStep::Plan),
            3 => Some(WizardStep::Confirm),
            _ => None,
        }
    }

    /// Derive the step from the active location.
    ///
    /// Anything that mentions neither `step-2` nor `step-3` is step 1.
    pub fn from_path(path: &str) -> Self {
        if path.contains("step-2") {
            WizardStep::Plan
        } else if path.contains("step-3") {
            WizardStep::Confirm
        } else {
            WizardStep::Details
        }
    }

    /// Sub-path relative to the wizard root. Step 1 is the index route.
    pub fn sub_path(&self) -> &'static str {
        match self {
            WizardStep::Details => "",
            WizardStep::Plan => "step-2",
            WizardStep::Confirm => "step-3",
        }
    }

    /// Absolute href for this step under `base` (e.g. `/wizard`).
    pub fn href(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self.sub_path() {
            "" => base.to_string(),
            sub => format!("{}/{}", base, sub),
        }
    }

    /// Panel heading.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Details => "Personal details",
            WizardStep::Plan => "Choose a plan",
            WizardStep::Confirm => "Confirm",
        }
    }

    /// Fields validated on this step.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            WizardStep::Details => &[Field::Name, Field::Email],
            WizardStep::Plan => &[Field::Plan],
            WizardStep::Confirm => &[Field::AgreeTerms],
        }
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, if any.
    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    pub fn is_first(&self) -> bool {
        self.previous().is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Path Derivation Tests ===

    #[test]
    fn test_from_path_index() {
        assert_eq!(WizardStep::from_path("/wizard"), WizardStep::Details);
        assert_eq!(WizardStep::from_path("/wizard/"), WizardStep::Details);
    }

    #[test]
    fn test_from_path_sub_steps() {
        assert_eq!(WizardStep::from_path("/wizard/step-2"), WizardStep::Plan);
        assert_eq!(WizardStep::from_path("/wizard/step-3"), WizardStep::Confirm);
    }

    #[test]
    fn test_from_path_malformed_defaults_to_first() {
        assert_eq!(WizardStep::from_path("/wizard/step-9"), WizardStep::Details);
        assert_eq!(WizardStep::from_path("/wizard/step-"), WizardStep::Details);
        assert_eq!(WizardStep::from_path(""), WizardStep::Details);
    }

    #[test]
    fn test_from_path_substring_match() {
        // Matching is by substring, wherever it appears
        assert_eq!(WizardStep::from_path("/x/step-3/y"), WizardStep::Confirm);
    }

    // === Navigation Tests ===

    #[test]
    fn test_href() {
        assert_eq!(WizardStep::Details.href("/wizard"), "/wizard");
        assert_eq!(WizardStep::Plan.href("/wizard/"), "/wizard/step-2");
        assert_eq!(WizardStep::Confirm.href("/wizard"), "/wizard/step-3");
    }

    #[test]
    fn test_href_round_trips_through_from_path() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_path(&step.href("/wizard")), step);
        }
    }

    #[test]
    fn test_next_and_previous() {
        assert_eq!(WizardStep::Details.next(), Some(WizardStep::Plan));
        assert_eq!(WizardStep::Confirm.next(), None);
        assert_eq!(WizardStep::Plan.previous(), Some(WizardStep::Details));
        assert_eq!(WizardStep::Details.previous(), None);
        assert!(WizardStep::Details.is_first());
        assert!(WizardStep::Confirm.is_last());
    }

    #[test]
    fn test_from_number_bounds() {
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(4), None);
        assert_eq!(WizardStep::from_number(2), Some(WizardStep::Plan));
    }

    #[test]
    fn test_display_is_number() {
        assert_eq!(WizardStep::Confirm.to_string(), "3");
    }
}
