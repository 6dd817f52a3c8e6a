//! Wizard form data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Subscription plans offered on step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Standard,
    Premium,
}

impl Plan {
    /// All plans in display order.
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Standard, Plan::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Standard => "Standard",
            Plan::Premium => "Premium",
        }
    }

    /// Price shown next to the radio button.
    pub fn price_label(&self) -> &'static str {
        match self {
            Plan::Basic => "Free",
            Plan::Standard => "¥99/month",
            Plan::Premium => "¥299/month",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown plan: {}", s))
    }
}

/// Form fields collected by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "plan")]
    Plan,
    #[serde(rename = "agreeTerms")]
    AgreeTerms,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Plan => "plan",
            Field::AgreeTerms => "agreeTerms",
        }
    }

    /// Input label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Plan => "Plan",
            Field::AgreeTerms => "Terms",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new value for one field, typed as that field is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Email(String),
    Plan(Option<Plan>),
    AgreeTerms(bool),
}

impl FieldUpdate {
    /// The field this update targets.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Name(_) => Field::Name,
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Plan(_) => Field::Plan,
            FieldUpdate::AgreeTerms(_) => Field::AgreeTerms,
        }
    }
}

/// Data entered across all wizard steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardData {
    pub name: String,
    pub email: String,
    pub plan: Option<Plan>,
    pub agree_terms: bool,
}

impl Default for WizardData {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            plan: Some(Plan::Basic),
            agree_terms: false,
        }
    }
}

impl WizardData {
    /// Apply an update in place.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(name) => self.name = name,
            FieldUpdate::Email(email) => self.email = email,
            FieldUpdate::Plan(plan) => self.plan = plan,
            FieldUpdate::AgreeTerms(agreed) => self.agree_terms = agreed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data() {
        let data = WizardData::default();
        assert!(data.name.is_empty());
        assert!(data.email.is_empty());
        assert_eq!(data.plan, Some(Plan::Basic));
        assert!(!data.agree_terms);
    }

    #[test]
    fn test_apply_updates() {
        let mut data = WizardData::default();
        data.apply(FieldUpdate::Name("Ann".into()));
        data.apply(FieldUpdate::Plan(Some(Plan::Premium)));
        data.apply(FieldUpdate::AgreeTerms(true));

        assert_eq!(data.name, "Ann");
        assert_eq!(data.plan, Some(Plan::Premium));
        assert!(data.agree_terms);
        assert!(data.email.is_empty());
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!("standard".parse::<Plan>().unwrap(), Plan::Standard);
        assert_eq!(" PREMIUM ".parse::<Plan>().unwrap(), Plan::Premium);
        assert!("gold".parse::<Plan>().is_err());
    }

    #[test]
    fn test_plan_price_labels() {
        assert_eq!(Plan::Basic.price_label(), "Free");
        assert_eq!(Plan::Standard.price_label(), "¥99/month");
        assert_eq!(Plan::Premium.price_label(), "¥299/month");
    }

    #[test]
    fn test_data_serializes_camel_case() {
        let json = serde_json::to_value(WizardData::default()).unwrap();
        assert_eq!(json["agreeTerms"], false);
        assert_eq!(json["plan"], "basic");
    }

    #[test]
    fn test_update_targets_field() {
        assert_eq!(FieldUpdate::Email(String::new()).field(), Field::Email);
        assert_eq!(FieldUpdate::AgreeTerms(false).field(), Field::AgreeTerms);
    }
}
