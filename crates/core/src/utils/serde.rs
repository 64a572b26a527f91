//! Serde integration for temporal values
//!
//! [`TemporalValue`] serializes to its tagged envelope and deserializes
//! through [`TaggedRegistry`] with the default [`CodecConfig`](crate::CodecConfig).
//!
//! For a field whose concrete type is fixed by the surrounding schema, use
//! the matching `with` module.
//!
//! # Usage
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tempowire_core::utils::{cron_expression, time_delta};
//! use tempowire_core::{CronExpression, Duration};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Job {
//!     #[serde(with = "cron_expression")]
//!     schedule: CronExpression,
//!     #[serde(with = "time_delta")]
//!     timeout: Duration,
//! }
//! ```

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::codec::{Envelope, TemporalCodec};
use crate::registry::{TaggedRegistry, TemporalValue};

/// Serde serialization result type
type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

fn serialize_with<C, S>(codec: &C, value: &C::Value, serializer: S) -> SerializeResult<S>
where
    C: TemporalCodec,
    S: Serializer,
{
    codec.encode(value).serialize(serializer)
}

fn deserialize_with<'de, C, D>(codec: &C, deserializer: D) -> Result<C::Value, D::Error>
where
    C: TemporalCodec,
    D: Deserializer<'de>,
{
    let envelope = Envelope::deserialize(deserializer)?;
    codec.decode(&envelope).map_err(de::Error::custom)
}

impl Serialize for TemporalValue {
    fn serialize<S>(&self, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        TaggedRegistry::default().encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TemporalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = Envelope::deserialize(deserializer)?;
        TaggedRegistry::default().decode(&envelope).map_err(de::Error::custom)
    }
}

/// `TimeDelta` envelope for a [`Duration`](crate::Duration) field
pub mod time_delta {
    use super::*;
    use crate::codec::DurationCodec;
    use crate::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serialize_with(&DurationCodec::default(), value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_with(&DurationCodec::default(), deserializer)
    }
}

/// `RelativeDelta` envelope for a [`RelativeOffset`](crate::RelativeOffset)
/// field
pub mod relative_delta {
    use super::*;
    use crate::codec::RelativeOffsetCodec;
    use crate::RelativeOffset;

    pub fn serialize<S>(value: &RelativeOffset, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serialize_with(&RelativeOffsetCodec::default(), value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<RelativeOffset, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_with(&RelativeOffsetCodec::default(), deserializer)
    }
}

/// `CronExpression` envelope for a [`CronExpression`](crate::CronExpression)
/// field
pub mod cron_expression {
    use super::*;
    use crate::codec::CronExpressionCodec;
    use crate::CronExpression;

    pub fn serialize<S>(value: &CronExpression, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serialize_with(&CronExpressionCodec::default(), value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<CronExpression, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_with(&CronExpressionCodec::default(), deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::{CronExpression, Duration, RelativeOffset};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Job {
        name: String,
        #[serde(with = "cron_expression")]
        schedule: CronExpression,
        #[serde(with = "time_delta")]
        timeout: Duration,
        #[serde(with = "relative_delta")]
        first_run: RelativeOffset,
    }

    fn job() -> Job {
        Job {
            name: "nightly".to_string(),
            schedule: CronExpression::new("0 2 * * *"),
            timeout: Duration::from_seconds(90),
            first_run: RelativeOffset::new().with_hour(2).with_days(1),
        }
    }

    #[test]
    fn test_with_modules_emit_envelopes() {
        let value = serde_json::to_value(job()).unwrap();

        assert_eq!(value["schedule"], json!({"__type": "CronExpression", "value": "0 2 * * *"}));
        assert_eq!(
            value["timeout"],
            json!({"__type": "TimeDelta", "days": 0, "seconds": 90, "microseconds": 0})
        );
        assert_eq!(value["first_run"]["hour"], json!(2));
        assert_eq!(value["first_run"]["minute"], json!(null));
    }

    #[test]
    fn test_with_modules_round_trip() {
        let json = serde_json::to_string(&job()).unwrap();
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job());
    }

    #[test]
    fn test_with_module_reports_validation_error() {
        let json = r#"{
            "name": "bad",
            "schedule": {"__type": "CronExpression"},
            "timeout": {"days": 1},
            "first_run": {}
        }"#;
        let err = serde_json::from_str::<Job>(json).unwrap_err();
        assert!(err.to_string().contains("value: missing field"), "got: {err}");
    }

    #[test]
    fn test_temporal_value_round_trip() {
        let values = vec![
            TemporalValue::from(Duration::new(1, 2, 3)),
            TemporalValue::from(RelativeOffset::new().with_month(2).with_leapdays(1)),
            TemporalValue::from(CronExpression::new("*/5 * * * *")),
        ];

        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<TemporalValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_temporal_value_unknown_tag() {
        let err = serde_json::from_str::<TemporalValue>(r#"{"__type": "Weekly"}"#).unwrap_err();
        assert!(err.to_string().contains("Unknown temporal variant 'Weekly'"));
    }

    #[test]
    fn test_temporal_value_rejects_non_object() {
        assert!(serde_json::from_str::<TemporalValue>(r#""TimeDelta""#).is_err());
    }
}
