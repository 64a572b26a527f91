//! `CronExpression` envelopes

use serde_json::Value;
use tempowire_common::ValidationResult;
use tempowire_domain::CronExpression;

use super::{tagged, Envelope, EnvelopeReader, TemporalCodec};
use crate::config::CodecConfig;
use crate::registry::TemporalKind;

const VALUE: &str = "value";

const FIELDS: [&str; 1] = [VALUE];

/// Codec for [`CronExpression`] values.
///
/// The expression is carried as an opaque string; grammar checks belong to
/// [`CronExpression::schedule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CronExpressionCodec {
    config: CodecConfig,
}

impl CronExpressionCodec {
    /// Create a codec that decodes under `config`.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

impl TemporalCodec for CronExpressionCodec {
    type Value = CronExpression;

    const KIND: TemporalKind = TemporalKind::CronExpression;

    fn encode(&self, value: &CronExpression) -> Envelope {
        let mut envelope = tagged(Self::KIND);
        envelope.insert(VALUE.to_string(), Value::from(value.as_str()));
        tracing::trace!(kind = %Self::KIND, expression = %value, "Encoded cron expression");
        envelope
    }

    fn decode(&self, envelope: &Envelope) -> ValidationResult<CronExpression> {
        let mut reader = EnvelopeReader::new(envelope, &self.config, Self::KIND, &FIELDS);
        let value = reader.required_string(VALUE);
        reader.finish(Self::KIND, CronExpression::new(value))
    }
}
