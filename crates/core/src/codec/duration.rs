//! `TimeDelta` envelopes

use serde_json::Value;
use tempowire_common::ValidationResult;
use tempowire_domain::Duration;

use super::{tagged, Envelope, EnvelopeReader, TemporalCodec};
use crate::config::CodecConfig;
use crate::registry::TemporalKind;

const DAYS: &str = "days";
const SECONDS: &str = "seconds";
const MICROSECONDS: &str = "microseconds";

const FIELDS: [&str; 3] = [DAYS, SECONDS, MICROSECONDS];

/// Codec for [`Duration`] values.
///
/// Absent components decode as 0. Components are kept exactly as sent, so
/// `{"seconds": 86400}` and `{"days": 1}` decode to different values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationCodec {
    config: CodecConfig,
}

impl DurationCodec {
    /// Create a codec that decodes under `config`.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

impl TemporalCodec for DurationCodec {
    type Value = Duration;

    const KIND: TemporalKind = TemporalKind::TimeDelta;

    fn encode(&self, value: &Duration) -> Envelope {
        let mut envelope = tagged(Self::KIND);
        envelope.insert(DAYS.to_string(), Value::from(value.days()));
        envelope.insert(SECONDS.to_string(), Value::from(value.seconds()));
        envelope.insert(MICROSECONDS.to_string(), Value::from(value.microseconds()));
        tracing::trace!(kind = %Self::KIND, ?value, "Encoded duration");
        envelope
    }

    fn decode(&self, envelope: &Envelope) -> ValidationResult<Duration> {
        let mut reader = EnvelopeReader::new(envelope, &self.config, Self::KIND, &FIELDS);

        let days = reader.integer(DAYS);
        let seconds = reader.integer(SECONDS);
        let microseconds = reader.integer(MICROSECONDS);

        reader.finish(Self::KIND, Duration::new(days, seconds, microseconds))
    }
}
