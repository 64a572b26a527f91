//! Dispatch on the `__type` discriminator
//!
//! The set of variants is closed: [`TemporalKind`] lists them and every
//! dispatch is an exhaustive `match`, so adding a variant fails to compile
//! until each site handles it. Only tags arriving from outside can be
//! unknown, and those surface as [`UnknownVariantError`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tempowire_common::validation::codes;
use tempowire_common::utils::kind_name;
use tempowire_common::{ValidationError, ValidationResult};
use tempowire_domain::{CronExpression, Duration, RelativeOffset};

use crate::codec::{
    CronExpressionCodec, DurationCodec, Envelope, RelativeOffsetCodec, TemporalCodec, TYPE_KEY,
};
use crate::config::CodecConfig;
use crate::errors::{CodecResult, UnknownVariantError};

/// The registered temporal variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    TimeDelta,
    RelativeDelta,
    CronExpression,
}

impl TemporalKind {
    /// Every variant, in registration order.
    pub const ALL: [TemporalKind; 3] =
        [TemporalKind::TimeDelta, TemporalKind::RelativeDelta, TemporalKind::CronExpression];

    /// The wire discriminator.
    pub const fn tag(self) -> &'static str {
        match self {
            TemporalKind::TimeDelta => "TimeDelta",
            TemporalKind::RelativeDelta => "RelativeDelta",
            TemporalKind::CronExpression => "CronExpression",
        }
    }

    /// Look up a variant by its discriminator. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownVariantError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnknownVariantError::new(tag))
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TemporalKind {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// A decoded value of any registered variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalValue {
    TimeDelta(Duration),
    RelativeDelta(RelativeOffset),
    CronExpression(CronExpression),
}

impl TemporalValue {
    /// The variant this value belongs to.
    pub fn kind(&self) -> TemporalKind {
        match self {
            TemporalValue::TimeDelta(_) => TemporalKind::TimeDelta,
            TemporalValue::RelativeDelta(_) => TemporalKind::RelativeDelta,
            TemporalValue::CronExpression(_) => TemporalKind::CronExpression,
        }
    }
}

impl From<Duration> for TemporalValue {
    fn from(value: Duration) -> Self {
        TemporalValue::TimeDelta(value)
    }
}

impl From<RelativeOffset> for TemporalValue {
    fn from(value: RelativeOffset) -> Self {
        TemporalValue::RelativeDelta(value)
    }
}

impl From<CronExpression> for TemporalValue {
    fn from(value: CronExpression) -> Self {
        TemporalValue::CronExpression(value)
    }
}

/// The codec resolved for one tag.
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    TimeDelta(DurationCodec),
    RelativeDelta(RelativeOffsetCodec),
    CronExpression(CronExpressionCodec),
}

impl Codec {
    fn for_kind(kind: TemporalKind, config: CodecConfig) -> Self {
        match kind {
            TemporalKind::TimeDelta => Codec::TimeDelta(DurationCodec::new(config)),
            TemporalKind::RelativeDelta => Codec::RelativeDelta(RelativeOffsetCodec::new(config)),
            TemporalKind::CronExpression => {
                Codec::CronExpression(CronExpressionCodec::new(config))
            }
        }
    }

    /// The variant this codec handles.
    pub fn kind(&self) -> TemporalKind {
        match self {
            Codec::TimeDelta(_) => DurationCodec::KIND,
            Codec::RelativeDelta(_) => RelativeOffsetCodec::KIND,
            Codec::CronExpression(_) => CronExpressionCodec::KIND,
        }
    }

    /// Decode `envelope` with this codec, widening the result.
    pub fn decode(&self, envelope: &Envelope) -> ValidationResult<TemporalValue> {
        match self {
            Codec::TimeDelta(codec) => codec.decode(envelope).map(TemporalValue::from),
            Codec::RelativeDelta(codec) => codec.decode(envelope).map(TemporalValue::from),
            Codec::CronExpression(codec) => codec.decode(envelope).map(TemporalValue::from),
        }
    }
}

/// Maps discriminators to codecs sharing one [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedRegistry {
    config: CodecConfig,
}

impl TaggedRegistry {
    /// Create a registry whose codecs all decode under `config`.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The configuration shared by every resolved codec.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Every registered discriminator.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> {
        TemporalKind::ALL.into_iter().map(TemporalKind::tag)
    }

    /// Pick the codec registered for `tag`.
    ///
    /// # Errors
    /// Returns [`UnknownVariantError`] if `tag` is not one of [`Self::tags`].
    pub fn resolve(&self, tag: &str) -> Result<Codec, UnknownVariantError> {
        let kind = TemporalKind::from_tag(tag)?;
        tracing::debug!(tag, "Resolved temporal codec");
        Ok(Codec::for_kind(kind, self.config))
    }

    /// Read the variant named by an envelope's `__type` key.
    ///
    /// # Errors
    /// - [`CodecError::Validation`](crate::CodecError::Validation) if the key
    ///   is missing or not a string
    /// - [`CodecError::UnknownVariant`](crate::CodecError::UnknownVariant) if
    ///   the tag is not registered
    pub fn kind_of(&self, envelope: &Envelope) -> CodecResult<TemporalKind> {
        match envelope.get(TYPE_KEY) {
            Some(Value::String(tag)) => Ok(TemporalKind::from_tag(tag)?),
            Some(other) => Err(ValidationError::coded(
                TYPE_KEY,
                format!("expected a string, got {}", kind_name(other)),
                codes::INVALID_TYPE,
            )
            .into()),
            None => {
                Err(ValidationError::coded(TYPE_KEY, "missing discriminator", codes::MISSING_FIELD)
                    .into())
            }
        }
    }

    /// Decode an envelope of any registered variant.
    ///
    /// # Errors
    /// Fails as [`Self::kind_of`] does, or with the chosen codec's
    /// validation error.
    pub fn decode(&self, envelope: &Envelope) -> CodecResult<TemporalValue> {
        let kind = self.kind_of(envelope).inspect_err(|err| {
            tracing::debug!(error = %err, "Rejected envelope discriminator");
        })?;
        let value = Codec::for_kind(kind, self.config).decode(envelope)?;
        tracing::debug!(kind = %kind, fields = envelope.len(), "Decoded tagged envelope");
        Ok(value)
    }

    /// Encode a value with the codec for its variant.
    pub fn encode(&self, value: &TemporalValue) -> Envelope {
        match value {
            TemporalValue::TimeDelta(v) => DurationCodec::new(self.config).encode(v),
            TemporalValue::RelativeDelta(v) => RelativeOffsetCodec::new(self.config).encode(v),
            TemporalValue::CronExpression(v) => CronExpressionCodec::new(self.config).encode(v),
        }
    }
}
