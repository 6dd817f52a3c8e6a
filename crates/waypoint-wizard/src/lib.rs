//! Multi-step signup wizard for Waypoint.
//!
//! The wizard walks a visitor through three screens:
//!
//! - **Step 1** (`/wizard`): name and email
//! - **Step 2** (`/wizard/step-2`): plan selection
//! - **Step 3** (`/wizard/step-3`): summary and terms acceptance
//!
//! All state lives in one [`WizardFlow`]. Step components are stateless and
//! call its explicit entry points: [`WizardFlow::update`],
//! [`WizardFlow::advance`], [`WizardFlow::go_back`] and
//! [`WizardFlow::submit`].
//!
//! # Example
//!
//! ```rust
//! use waypoint_wizard::prelude::*;
//!
//! let mut flow = WizardFlow::new();
//!
//! // Empty data blocks the first transition
//! assert!(flow.advance().is_err());
//! assert!(flow.errors().contains(Field::Name));
//!
//! flow.update(FieldUpdate::Name("Ann".into()));
//! flow.update(FieldUpdate::Email("ann@example.com".into()));
//! assert_eq!(flow.advance().unwrap(), WizardStep::Plan);
//! assert_eq!(flow.progress().width_css(), "40%");
//! ```

pub mod data;
pub mod error;
pub mod flow;
pub mod progress;
pub mod step;
pub mod validation;

pub use data::{Field, FieldUpdate, Plan, WizardData};
pub use error::{FieldError, WizardError};
pub use flow::{Submission, WizardFlow};
pub use progress::{Marker, MarkerState, Progress};
pub use step::{WizardStep, TOTAL_STEPS};
pub use validation::{is_valid_email, validate_step, ValidationErrors};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::data::{Field, FieldUpdate, Plan, WizardData};
    pub use crate::error::{FieldError, WizardError};
    pub use crate::flow::{Submission, WizardFlow};
    pub use crate::progress::{Marker, MarkerState, Progress};
    pub use crate::step::{WizardStep, TOTAL_STEPS};
    pub use crate::validation::{validate_step, ValidationErrors};
}
