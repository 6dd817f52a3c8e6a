//! Progress indicator model.
//!
//! Rendering is left to the UI; this computes what to draw.

use serde::Serialize;

use crate::step::{WizardStep, TOTAL_STEPS};

/// Share of the track the progress line can cover, in percent.
const TRACK_SPAN_PERCENT: f64 = 80.0;

/// Visual state of one step marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerState {
    Complete,
    Active,
    Pending,
}

impl MarkerState {
    /// CSS modifier class.
    pub fn class(&self) -> &'static str {
        match self {
            MarkerState::Complete => "progress-step complete",
            MarkerState::Active => "progress-step active",
            MarkerState::Pending => "progress-step",
        }
    }
}

/// One numbered circle on the progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub step: WizardStep,
    pub state: MarkerState,
}

impl Marker {
    /// Check mark for completed steps, the step number otherwise.
    pub fn glyph(&self) -> String {
        match self.state {
            MarkerState::Complete => "✓".to_string(),
            _ => self.step.number().to_string(),
        }
    }

    /// Caption under the marker.
    pub fn label(&self) -> String {
        format!("Step {}", self.step.number())
    }
}

/// Progress bar for a given current step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub current: WizardStep,
    pub markers: Vec<Marker>,
    /// Width of the active line, in percent of the bar.
    pub width_percent: f64,
}

impl Progress {
    pub fn for_step(current: WizardStep) -> Self {
        let markers = WizardStep::ALL
            .into_iter()
            .map(|step| Marker {
                step,
                state: if step < current {
                    MarkerState::Complete
                } else if step == current {
                    MarkerState::Active
                } else {
                    MarkerState::Pending
                },
            })
            .collect();

        let done = f64::from(current.number() - 1);
        let span = f64::from(TOTAL_STEPS - 1);

        Self {
            current,
            markers,
            width_percent: done / span * TRACK_SPAN_PERCENT,
        }
    }

    /// Width as a CSS length, e.g. `40%`.
    pub fn width_css(&self) -> String {
        format!("{}%", self.width_percent)
    }

    /// Plain-text bar for terminals, e.g. `(✓)──[2]──(3)`.
    pub fn render_text(&self) -> String {
        self.markers
            .iter()
            .map(|m| match m.state {
                MarkerState::Active => format!("[{}]", m.glyph()),
                _ => format!("({})", m.glyph()),
            })
            .collect::<Vec<_>>()
            .join("──")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(progress: &Progress) -> Vec<MarkerState> {
        progress.markers.iter().map(|m| m.state).collect()
    }

    #[test]
    fn test_width_per_step() {
        assert_eq!(Progress::for_step(WizardStep::Details).width_css(), "0%");
        assert_eq!(Progress::for_step(WizardStep::Plan).width_css(), "40%");
        assert_eq!(Progress::for_step(WizardStep::Confirm).width_css(), "80%");
    }

    #[test]
    fn test_marker_states() {
        use MarkerState::*;

        assert_eq!(
            states(&Progress::for_step(WizardStep::Details)),
            vec![Active, Pending, Pending]
        );
        assert_eq!(
            states(&Progress::for_step(WizardStep::Plan)),
            vec![Complete, Active, Pending]
        );
        assert_eq!(
            states(&Progress::for_step(WizardStep::Confirm)),
            vec![Complete, Complete, Active]
        );
    }

    #[test]
    fn test_marker_glyphs_and_labels() {
        let progress = Progress::for_step(WizardStep::Plan);
        let glyphs: Vec<String> = progress.markers.iter().map(|m| m.glyph()).collect();
        assert_eq!(glyphs, vec!["✓", "2", "3"]);
        assert_eq!(progress.markers[2].label(), "Step 3");
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            Progress::for_step(WizardStep::Confirm).render_text(),
            "(✓)──(✓)──[3]"
        );
        assert_eq!(
            Progress::for_step(WizardStep::Plan).render_text(),
            "(✓)──[2]──(3)"
        );
    }
}
