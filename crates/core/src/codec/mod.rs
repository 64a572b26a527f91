//! Per-variant codecs
//!
//! Each codec converts one domain value to and from an [`Envelope`]: a JSON
//! object holding the `__type` discriminator and the variant's fields,
//! flattened side by side.
//!
//! Encoding is total and always produces the complete shape. Decoding reads
//! only the keys that are present, validates them all and either returns a
//! fully built value or a [`ValidationError`](tempowire_common::ValidationError)
//! listing every problem.

mod cron;
mod duration;
mod relative;

use serde_json::{Map, Value};
use tempowire_common::utils::{as_integer, kind_name};
use tempowire_common::validation::codes;
use tempowire_common::{ValidationError, ValidationResult, Validator};

pub use self::cron::CronExpressionCodec;
pub use self::duration::DurationCodec;
pub use self::relative::RelativeOffsetCodec;
use crate::config::{CodecConfig, UnknownKeyPolicy};
use crate::registry::TemporalKind;

/// Reserved key carrying the variant discriminator.
pub const TYPE_KEY: &str = "__type";

/// A decoded JSON object, as handed over by the transport layer.
pub type Envelope = Map<String, Value>;

/// Conversion between one temporal value type and its tagged envelope.
pub trait TemporalCodec {
    /// The domain value handled by this codec.
    type Value;

    /// The variant this codec is registered under.
    const KIND: TemporalKind;

    /// Encode `value` into its complete envelope.
    fn encode(&self, value: &Self::Value) -> Envelope;

    /// Decode an envelope, which may omit optional keys.
    ///
    /// # Errors
    /// Returns a [`tempowire_common::ValidationError`] naming every
    /// unrecognized key, mistyped value or missing required field.
    fn decode(&self, envelope: &Envelope) -> ValidationResult<Self::Value>;
}

/// Start an envelope with the discriminator for `kind`.
fn tagged(kind: TemporalKind) -> Envelope {
    let mut envelope = Envelope::new();
    envelope.insert(TYPE_KEY.to_string(), Value::from(kind.tag()));
    envelope
}

fn type_mismatch(field: &str, expected: &str, found: &Value) -> ValidationError {
    ValidationError::coded(
        field,
        format!("expected {}, got {}", expected, kind_name(found)),
        codes::INVALID_TYPE,
    )
}

/// Presence of a key in an envelope.
///
/// Keeps "absent" and "explicitly null" apart so each codec decides what
/// they mean for its own fields.
enum Slot<'a> {
    Missing,
    Null,
    Present(&'a Value),
}

/// Walks an envelope for one codec, collecting every validation problem.
struct EnvelopeReader<'a> {
    envelope: &'a Envelope,
    config: &'a CodecConfig,
    validator: Validator,
}

impl<'a> EnvelopeReader<'a> {
    /// Check the discriminator and the key set before any field is read.
    fn new(
        envelope: &'a Envelope,
        config: &'a CodecConfig,
        kind: TemporalKind,
        fields: &[&str],
    ) -> Self {
        let mut reader = Self { envelope, config, validator: Validator::new() };

        if config.enforce_type_tag {
            reader.check_tag(kind);
        }

        for key in envelope.keys() {
            if key == TYPE_KEY || fields.contains(&key.as_str()) {
                continue;
            }
            match config.unknown_keys {
                UnknownKeyPolicy::Reject => {
                    reader.validator.add_error_with_code(
                        key.clone(),
                        "unknown field",
                        codes::UNKNOWN_FIELD,
                    );
                }
                UnknownKeyPolicy::Ignore => {
                    tracing::trace!(key = %key, kind = %kind, "Ignoring unknown envelope key");
                }
            }
        }

        reader
    }

    fn check_tag(&mut self, kind: TemporalKind) {
        match self.slot(TYPE_KEY) {
            Slot::Present(Value::String(tag)) if tag == kind.tag() => {}
            Slot::Present(Value::String(tag)) => self.validator.add_error_with_code(
                TYPE_KEY,
                format!("expected '{}', got '{}'", kind.tag(), tag),
                codes::INVALID_VALUE,
            ),
            Slot::Present(other) => self.invalid_type(TYPE_KEY, "a string", other),
            Slot::Null => self.invalid_type(TYPE_KEY, "a string", &Value::Null),
            Slot::Missing => self.validator.add_error_with_code(
                TYPE_KEY,
                "missing discriminator",
                codes::MISSING_FIELD,
            ),
        }
    }

    fn slot(&self, field: &str) -> Slot<'a> {
        match self.envelope.get(field) {
            None => Slot::Missing,
            Some(Value::Null) => Slot::Null,
            Some(value) => Slot::Present(value),
        }
    }

    fn invalid_type(&mut self, field: &str, expected: &str, found: &Value) {
        self.validator.check::<()>(Err(type_mismatch(field, expected, found)));
    }

    /// Read `value` as an integer, recording a type error as 0.
    fn to_integer(&mut self, field: &str, value: &Value) -> i64 {
        let result = as_integer(value, self.config.accept_integral_floats)
            .ok_or_else(|| type_mismatch(field, "an integer", value));
        self.validator.check(result).unwrap_or(0)
    }

    /// An integer that defaults to 0 when absent; `null` is rejected.
    fn integer(&mut self, field: &str) -> i64 {
        match self.slot(field) {
            Slot::Missing => 0,
            Slot::Null => {
                self.invalid_type(field, "an integer", &Value::Null);
                0
            }
            Slot::Present(value) => self.to_integer(field, value),
        }
    }

    /// An integer that defaults to 0 when absent or `null`.
    fn integer_or_zero(&mut self, field: &str) -> i64 {
        match self.slot(field) {
            Slot::Missing | Slot::Null => 0,
            Slot::Present(value) => self.to_integer(field, value),
        }
    }

    /// An integer that stays unset when absent or `null`.
    fn optional_integer(&mut self, field: &str) -> Option<i64> {
        match self.slot(field) {
            Slot::Missing | Slot::Null => None,
            Slot::Present(value) => Some(self.to_integer(field, value)),
        }
    }

    /// A string that must be present.
    fn required_string(&mut self, field: &str) -> String {
        let result = match self.slot(field) {
            Slot::Present(Value::String(s)) => Ok(s.clone()),
            Slot::Present(other) => Err(type_mismatch(field, "a string", other)),
            Slot::Null => Err(type_mismatch(field, "a string", &Value::Null)),
            Slot::Missing => {
                Err(ValidationError::coded(field, "missing field", codes::MISSING_FIELD))
            }
        };
        self.validator.check(result).unwrap_or_default()
    }

    /// Hand back `value` only if nothing was recorded along the way.
    fn finish<T>(self, kind: TemporalKind, value: T) -> ValidationResult<T> {
        let result = self.validator.finish(value);
        match &result {
            Ok(_) => tracing::trace!(kind = %kind, "Envelope decoded"),
            Err(err) => {
                tracing::debug!(kind = %kind, errors = err.error_count(), "Envelope rejected")
            }
        }
        result
    }
}
