//! JSON value helpers
//!
//! Inbound payloads arrive as `serde_json::Value` trees that have already
//! been parsed by the transport. These helpers answer the two questions a
//! decoder keeps asking: "is this an integer?" and "what was it instead?".

use serde_json::Value;

/// Interpret a JSON value as a signed 64-bit integer.
///
/// Integers are always accepted. Floats are accepted only when
/// `accept_integral_floats` is set, the value has no fractional part and it
/// fits in `i64`. Every other kind (including booleans and numeric strings)
/// yields `None`.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "foundation")]
/// # {
/// use serde_json::json;
/// use tempowire_common::utils::as_integer;
///
/// assert_eq!(as_integer(&json!(12), false), Some(12));
/// assert_eq!(as_integer(&json!(12.0), true), Some(12));
/// assert_eq!(as_integer(&json!(12.0), false), None);
/// assert_eq!(as_integer(&json!("12"), true), None);
/// # }
/// ```
pub fn as_integer(value: &Value, accept_integral_floats: bool) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(int) = number.as_i64() {
        return Some(int);
    }

    // u64 beyond i64::MAX lands here too; as_f64 makes it fail the range check
    if !accept_integral_floats || number.is_u64() {
        return None;
    }

    let float = number.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    if float.is_finite() && float.fract() == 0.0 && in_range {
        Some(float as i64)
    } else {
        None
    }
}

/// Human-readable name of a JSON value's kind, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
