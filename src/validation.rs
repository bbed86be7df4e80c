//! Validation rules applied before any write.
//!
//! Each check produces a [`ValidationError`] naming the offending field, and
//! the workflows collect them into [`ValidationErrors`] in the order the
//! checks ran. Nothing here touches the database; uniqueness and membership
//! checks live in [`crate::operations`] and push into the same collection.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use utoipa::ToSchema;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+$").expect("name pattern is a valid regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w.\-]+)@([\w\-]+)((\.(\w){2,3})+)$").expect("email pattern is a valid regex")
});

/// Validation error with field name and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation (wire name, e.g. `firstName`)
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error of a failed check, if any
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.add(error);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// True if any error is scoped to `field`
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Convert to Result
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was collected.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// One uppercase letter followed by one or more lowercase letters.
#[must_use]
pub fn is_name_valid(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

#[must_use]
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Helper validators for common patterns
pub mod validators {
    use super::{NaiveDate, ValidationError, is_email_valid, is_name_valid};

    /// Validate a personal name field
    ///
    /// # Errors
    ///
    /// Returns a field error when `value` is not a capitalized word.
    pub fn validate_name(field: &str, value: &str) -> Result<(), ValidationError> {
        if is_name_valid(value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                "Must be one capital letter followed by lowercase letters",
            ))
        }
    }

    /// Middle names are optional; only a non-empty value is checked.
    ///
    /// # Errors
    ///
    /// Returns a field error when a present middle name is not a capitalized word.
    pub fn validate_optional_name(field: &str, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            Some(name) if !name.is_empty() => validate_name(field, name),
            _ => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns a field error when `value` does not look like an email address.
    pub fn validate_email(field: &str, value: &str) -> Result<(), ValidationError> {
        if is_email_valid(value) {
            Ok(())
        } else {
            Err(ValidationError::new(field, "Invalid email format"))
        }
    }

    /// Validate value is not blank
    ///
    /// # Errors
    ///
    /// Returns a field error when `value` is empty or whitespace.
    pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
        Ok(())
    }

    /// The start of a date range must be strictly before its end. The error is
    /// reported on `field`, which names the end date.
    ///
    /// # Errors
    ///
    /// Returns a field error when `start >= end`.
    pub fn validate_date_range(
        field: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), ValidationError> {
        if start >= end {
            return Err(ValidationError::new(
                field,
                "Start date must be earlier than end date",
            ));
        }
        Ok(())
    }
}
