//! Integration tests for the validation module
//!
//! Exercises the accumulate-then-finalize flow decoders rely on, together
//! with the JSON helpers used to classify offending values.

use serde_json::json;
use tempowire_common::utils::{as_integer, kind_name};
use tempowire_common::validation::codes;
use tempowire_common::{ErrorClassification, ErrorSeverity, ValidationError, Validator};

/// Walks a small payload the way a decoder does and collects every problem.
#[test]
fn test_validator_collects_all_field_problems() {
    let payload = json!({"days": "twelve", "seconds": 1.5, "microseconds": 3, "extra": true});
    let object = payload.as_object().expect("fixture is an object");

    let mut validator = Validator::new();
    let mut total = 0i64;
    for (key, value) in object {
        match key.as_str() {
            "days" | "seconds" | "microseconds" => match as_integer(value, true) {
                Some(v) => total += v,
                None => validator.add_error_with_code(
                    key.clone(),
                    format!("expected an integer, got {}", kind_name(value)),
                    codes::INVALID_TYPE,
                ),
            },
            other => validator.add_error_with_code(other, "unknown field", codes::UNKNOWN_FIELD),
        }
    }

    assert_eq!(total, 3);

    let err = validator.finish(total).unwrap_err();
    assert_eq!(err.error_count(), 3);
    assert!(err.has_code("days", codes::INVALID_TYPE));
    assert!(err.has_code("seconds", codes::INVALID_TYPE));
    assert!(err.has_code("extra", codes::UNKNOWN_FIELD));
    assert_eq!(err.field_errors("days")[0].message, "expected an integer, got string");
}

/// Merging keeps the errors of both sides in order.
#[test]
fn test_merge_preserves_order() {
    let mut first = ValidationError::coded("a", "first", codes::INVALID_TYPE);
    first.merge(ValidationError::coded("b", "second", codes::UNKNOWN_FIELD));

    let fields: Vec<&str> = first.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["a", "b"]);
}

/// Validation failures are client errors and never worth retrying.
#[test]
fn test_validation_error_classification() {
    let err = ValidationError::coded("value", "required", codes::MISSING_FIELD);
    assert!(!err.is_retryable());
    assert_eq!(err.severity(), ErrorSeverity::Warning);
}
