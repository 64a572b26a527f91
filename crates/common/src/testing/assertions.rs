//! Custom assertions for testing

// These assertions are designed to panic on failure
#![allow(clippy::missing_panics_doc)]

/// Assert that an error contains a specific substring
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-utils")]
/// # {
/// let result: Result<(), String> = Err("unknown variant 'Unknown'".to_string());
/// tempowire_common::assert_error_contains!(result, "Unknown");
/// # }
/// ```
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $substring:expr) => {
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let error_msg = format!("{}", e);
                assert!(
                    error_msg.contains($substring),
                    "Error message '{}' does not contain '{}'",
                    error_msg,
                    $substring
                );
            }
        }
    };
}

/// Assert that a validation error flags `field` with `code`
#[cfg(feature = "foundation")]
pub fn assert_field_error(err: &crate::validation::ValidationError, field: &str, code: &str) {
    assert!(
        err.has_code(field, code),
        "Expected field '{}' to carry code '{}', got: {:?}",
        field,
        code,
        err.errors
    );
}
