//! Field-level validation errors
//!
//! Decoders report every offending field of an input in a single
//! [`ValidationError`] instead of failing on the first one, so a client can
//! correct a payload in one round trip. [`Validator`] is the accumulator used
//! while walking an input.
use std::fmt;

use serde::Serialize;

use crate::error::{ErrorClassification, ErrorSeverity};

/// Machine-readable codes attached to [`FieldError`]s.
pub mod codes {
    /// The field name is not part of the expected shape.
    pub const UNKNOWN_FIELD: &str = "unknown_field";
    /// The field is present but holds a value of the wrong kind.
    pub const INVALID_TYPE: &str = "invalid_type";
    /// A required field is absent.
    pub const MISSING_FIELD: &str = "missing_field";
    /// The value has the right kind but is not one of the accepted values.
    pub const INVALID_VALUE: &str = "invalid_value";
}

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
///
/// Serializes as `{"errors": [{"field": .., "message": .., "code": ..}]}` for
/// client-facing error bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new, empty validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single coded field error
    pub fn coded(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        let mut err = Self::new();
        err.add_error_with_code(field, message, code);
        err
    }

    /// Add a field error with code
    pub fn add_error_with_code(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.errors.push(FieldError::new(field, message, code));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Whether `field` carries an error with the given code
    pub fn has_code(&self, field: &str, code: &str) -> bool {
        self.errors.iter().any(|e| e.field == field && e.code == code)
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "Validation error with no specific field errors")?;
        } else if self.errors.len() == 1 {
            let error = &self.errors[0];
            write!(f, "Validation failed: {}: {}", error.field, error.message)?;
        } else {
            write!(f, "Validation failed with {} errors: ", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", error.field, error.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ErrorClassification for ValidationError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<std::time::Duration> {
        None
    }
}

/// Individual field error, always tagged with one of the [`codes`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self { field: field.into(), message: message.into(), code: code.into() }
    }
}

/// Accumulates field errors while an input is being walked
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { errors: ValidationError::new() }
    }

    /// Add an error carrying one of the [`codes`]
    pub fn add_error_with_code(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.errors.add_error_with_code(field, message, code);
    }

    /// Record the outcome of a fallible field check, keeping the value on
    /// success.
    pub fn check<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.merge(err);
                None
            }
        }
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Finalize, handing back `value` only when no error was recorded
    pub fn finish<T>(self, value: T) -> ValidationResult<T> {
        self.finalize().map(|()| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_error_display_names_field() {
        let err = ValidationError::coded("days", "must be an integer", codes::INVALID_TYPE);
        assert_eq!(err.to_string(), "Validation failed: days: must be an integer");
    }

    #[test]
    fn test_multiple_errors_display() {
        let mut err = ValidationError::new();
        err.add_error_with_code("days", "must be an integer", codes::INVALID_TYPE);
        err.add_error_with_code("bogus", "unknown field", codes::UNKNOWN_FIELD);
        assert_eq!(
            err.to_string(),
            "Validation failed with 2 errors: days: must be an integer; bogus: unknown field"
        );
    }

    #[test]
    fn test_has_code() {
        let err = ValidationError::coded("bogus", "unknown field", codes::UNKNOWN_FIELD);
        assert!(err.has_code("bogus", codes::UNKNOWN_FIELD));
        assert!(!err.has_code("bogus", codes::INVALID_TYPE));
        assert!(!err.has_code("days", codes::UNKNOWN_FIELD));
    }

    #[test]
    fn test_validator_finish_keeps_value_without_errors() {
        let validator = Validator::new();
        assert_eq!(validator.finish(42), Ok(42));
    }

    #[test]
    fn test_validator_check_collects_errors() {
        let mut validator = Validator::new();
        let kept = validator.check::<i64>(Ok(5));
        let dropped = validator.check::<i64>(Err(ValidationError::coded(
            "seconds",
            "must be an integer",
            codes::INVALID_TYPE,
        )));

        assert_eq!(kept, Some(5));
        assert_eq!(dropped, None);

        let err = validator.finish(()).unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.field_errors("seconds").len(), 1);
    }

    #[test]
    fn test_serializes_for_client_response() {
        let mut err = ValidationError::coded("weeks", "unknown field", codes::UNKNOWN_FIELD);
        err.add_error_with_code("days", "must be an integer", codes::INVALID_TYPE);

        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"errors": [
                {"field": "weeks", "message": "unknown field", "code": "unknown_field"},
                {"field": "days", "message": "must be an integer", "code": "invalid_type"}
            ]})
        );
    }

    #[test]
    fn test_validation_error_is_not_retryable() {
        let err = ValidationError::coded("value", "required", codes::MISSING_FIELD);
        assert!(!err.is_retryable());
        assert!(!err.is_critical());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.retry_after(), None);
    }
}
