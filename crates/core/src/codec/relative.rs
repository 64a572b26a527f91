//! `RelativeDelta` envelopes
//!
//! The full shape has fifteen keys. Absolute-set fields (`year` ..
//! `microsecond`) are emitted as `null` when unset; relative-add fields
//! (`years` .. `microseconds`, `leapdays`) are always integers.
//!
//! Decoding accepts any subset of those keys. An absent or `null`
//! absolute-set key leaves the field unset, which is not the same as `0`.

use serde_json::Value;
use tempowire_common::ValidationResult;
use tempowire_domain::RelativeOffset;

use super::{tagged, Envelope, EnvelopeReader, TemporalCodec};
use crate::config::CodecConfig;
use crate::registry::TemporalKind;

const YEAR: &str = "year";
const MONTH: &str = "month";
const DAY: &str = "day";
const HOUR: &str = "hour";
const MINUTE: &str = "minute";
const SECOND: &str = "second";
const MICROSECOND: &str = "microsecond";

const YEARS: &str = "years";
const MONTHS: &str = "months";
const DAYS: &str = "days";
const HOURS: &str = "hours";
const MINUTES: &str = "minutes";
const SECONDS: &str = "seconds";
const MICROSECONDS: &str = "microseconds";
const LEAPDAYS: &str = "leapdays";

const FIELDS: [&str; 15] = [
    YEAR,
    MONTH,
    DAY,
    HOUR,
    MINUTE,
    SECOND,
    MICROSECOND,
    YEARS,
    MONTHS,
    DAYS,
    HOURS,
    MINUTES,
    SECONDS,
    MICROSECONDS,
    LEAPDAYS,
];

/// Codec for [`RelativeOffset`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeOffsetCodec {
    config: CodecConfig,
}

impl RelativeOffsetCodec {
    /// Create a codec that decodes under `config`.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

fn put(envelope: &mut Envelope, key: &str, value: impl Into<Value>) {
    envelope.insert(key.to_string(), value.into());
}

impl TemporalCodec for RelativeOffsetCodec {
    type Value = RelativeOffset;

    const KIND: TemporalKind = TemporalKind::RelativeDelta;

    fn encode(&self, value: &RelativeOffset) -> Envelope {
        let mut envelope = tagged(Self::KIND);

        // Option<i64> converts to Value::Null when unset
        put(&mut envelope, YEAR, value.year);
        put(&mut envelope, MONTH, value.month);
        put(&mut envelope, DAY, value.day);
        put(&mut envelope, HOUR, value.hour);
        put(&mut envelope, MINUTE, value.minute);
        put(&mut envelope, SECOND, value.second);
        put(&mut envelope, MICROSECOND, value.microsecond);

        put(&mut envelope, YEARS, value.years);
        put(&mut envelope, MONTHS, value.months);
        put(&mut envelope, DAYS, value.days);
        put(&mut envelope, HOURS, value.hours);
        put(&mut envelope, MINUTES, value.minutes);
        put(&mut envelope, SECONDS, value.seconds);
        put(&mut envelope, MICROSECONDS, value.microseconds);
        put(&mut envelope, LEAPDAYS, value.leapdays);

        tracing::trace!(
            kind = %Self::KIND,
            absolute = value.has_absolute_fields(),
            "Encoded relative offset"
        );
        envelope
    }

    fn decode(&self, envelope: &Envelope) -> ValidationResult<RelativeOffset> {
        let mut reader = EnvelopeReader::new(envelope, &self.config, Self::KIND, &FIELDS);

        let offset = RelativeOffset {
            year: reader.optional_integer(YEAR),
            month: reader.optional_integer(MONTH),
            day: reader.optional_integer(DAY),
            hour: reader.optional_integer(HOUR),
            minute: reader.optional_integer(MINUTE),
            second: reader.optional_integer(SECOND),
            microsecond: reader.optional_integer(MICROSECOND),
            years: reader.integer_or_zero(YEARS),
            months: reader.integer_or_zero(MONTHS),
            days: reader.integer_or_zero(DAYS),
            hours: reader.integer_or_zero(HOURS),
            minutes: reader.integer_or_zero(MINUTES),
            seconds: reader.integer_or_zero(SECONDS),
            microseconds: reader.integer_or_zero(MICROSECONDS),
            leapdays: reader.integer_or_zero(LEAPDAYS),
        };

        reader.finish(Self::KIND, offset)
    }
}
