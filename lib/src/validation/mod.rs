// lib/src/validation/mod.rs

//! Field-level validation of the three dashboard forms.
//!
//! A schema is an ordered list of fields, each with zero or more rules. A
//! field reports only its first failing rule, and errors come back in schema
//! order so a renderer can place them inline.

pub mod forms;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use forms::{BloodRequestForm, DonationForm, FieldOptions, ProfileForm, SelectOption};

use crate::submission::FormKind;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A single constraint on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least `n` characters, counted as Unicode scalar values.
    MinChars(usize, &'static str),
    Email(&'static str),
    MustBeTrue(&'static str),
}

/// The raw value a rule is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Rule::MinChars(_, message) | Rule::Email(message) | Rule::MustBeTrue(message) => {
                message
            }
        }
    }

    pub fn check(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::MinChars(min, _), FieldValue::Text(text)) => text.chars().count() >= *min,
            (Rule::Email(_), FieldValue::Text(text)) => EMAIL_PATTERN.is_match(text),
            (Rule::MustBeTrue(_), FieldValue::Flag(flag)) => flag,
            // A rule applied to the wrong kind of field never passes.
            _ => false,
        }
    }
}

/// One field of a schema, in the order it is rendered.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn optional(name: &'static str) -> Self {
        FieldSpec { name, rules: &[] }
    }

    pub const fn required(name: &'static str, rules: &'static [Rule]) -> Self {
        FieldSpec { name, rules }
    }

    pub fn is_required(&self) -> bool {
        !self.rules.is_empty()
    }

    fn first_failure(&self, value: FieldValue<'_>) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.check(value))
            .map(Rule::message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

/// A form whose fields are checked against a fixed schema before submit.
pub trait FormSchema: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    const KIND: FormKind;
    const FIELDS: &'static [FieldSpec];

    /// Current value of a schema field.
    fn value(&self, field: &str) -> FieldValue<'_>;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = Self::FIELDS
            .iter()
            .filter_map(|spec| {
                spec.first_failure(self.value(spec.name))
                    .map(|message| FieldError {
                        field: spec.name,
                        message,
                    })
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    /// Choices of the form's select fields.
    fn select_options() -> Vec<FieldOptions> {
        Vec::new()
    }

    fn required_fields() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|spec| spec.is_required())
            .map(|spec| spec.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_count_characters_not_bytes() {
        let rule = Rule::MinChars(2, "too short");
        assert!(rule.check(FieldValue::Text("Zoë")));
        assert!(rule.check(FieldValue::Text("李明")));
        assert!(!rule.check(FieldValue::Text("é")));
    }

    #[test]
    fn should_accept_plausible_emails_only() {
        let rule = Rule::Email("bad email");
        assert!(rule.check(FieldValue::Text("john.doe@example.com")));
        assert!(!rule.check(FieldValue::Text("john.doe@example")));
        assert!(!rule.check(FieldValue::Text("john doe@example.com")));
        assert!(!rule.check(FieldValue::Text("")));
    }

    #[test]
    fn should_require_flag_to_be_true() {
        let rule = Rule::MustBeTrue("consent");
        assert!(rule.check(FieldValue::Flag(true)));
        assert!(!rule.check(FieldValue::Flag(false)));
        assert!(!rule.check(FieldValue::Text("true")));
    }

    #[test]
    fn should_report_first_failing_rule_only() {
        let spec = FieldSpec::required(
            "email",
            &[Rule::MinChars(1, "Email is required"), Rule::Email("Invalid email")],
        );
        assert_eq!(spec.first_failure(FieldValue::Text("")), Some("Email is required"));
        assert_eq!(spec.first_failure(FieldValue::Text("x")), Some("Invalid email"));
        assert_eq!(spec.first_failure(FieldValue::Text("x@y.io")), None);
        assert!(!FieldSpec::optional("notes").is_required());
    }
}
