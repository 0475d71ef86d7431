//! Field-level validation errors.
//!
//! Errors are keyed by the field's display name (`Title`) so they can be
//! rendered directly into the `errors` member of a validation problem
//! document.

use std::collections::BTreeMap;
use thiserror::Error;

/// A set of validation failures, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("One or more validation errors occurred.")]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record a failure message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failures grouped by field, in field-name order.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Check that a text field holds something other than whitespace.
    pub fn require_text(&mut self, field: &str, value: Option<&str>) {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.add(field, format!("The {field} field is required."));
        }
    }

    /// Turn the collected failures into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_missing_and_blank() {
        let mut errors = ValidationErrors::new();
        errors.require_text("Title", None);
        errors.require_text("Title", Some("   "));

        assert_eq!(
            errors.fields().get("Title"),
            Some(&vec![
                "The Title field is required.".to_string(),
                "The Title field is required.".to_string(),
            ])
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_require_text_accepts_value() {
        let mut errors = ValidationErrors::new();
        errors.require_text("Title", Some("A"));
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }
}
