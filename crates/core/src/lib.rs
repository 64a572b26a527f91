//! # tempowire Core
//!
//! Tagged-variant codec for temporal values.
//!
//! Every encoded value is a JSON object carrying a `__type` discriminator
//! next to the variant's own fields:
//!
//! | `__type` | Value | Fields |
//! |----------|-------|--------|
//! | `TimeDelta` | [`Duration`] | `days`, `seconds`, `microseconds` |
//! | `RelativeDelta` | [`RelativeOffset`] | `year`..`microsecond`, `years`..`microseconds`, `leapdays` |
//! | `CronExpression` | [`CronExpression`] | `value` |
//!
//! Use a concrete codec ([`DurationCodec`], [`RelativeOffsetCodec`],
//! [`CronExpressionCodec`]) when the surrounding schema fixes the type, and
//! the [`TaggedRegistry`] when it does not.
//!
//! ```
//! use serde_json::json;
//! use tempowire_core::{TaggedRegistry, TemporalValue};
//! use tempowire_domain::Duration;
//!
//! let registry = TaggedRegistry::default();
//! let envelope = json!({"__type": "TimeDelta", "days": 12});
//! let value = registry.decode(envelope.as_object().unwrap()).unwrap();
//! assert_eq!(value, TemporalValue::TimeDelta(Duration::from_days(12)));
//! ```
//!
//! ## Architecture Principles
//! - Encoding and decoding are pure, synchronous functions
//! - Decode validates the whole input up front and reports every problem
//! - The transport (JSON text, HTTP) is the caller's concern

pub mod codec;
pub mod config;
pub mod errors;
pub mod registry;
pub mod utils;

pub use codec::{
    CronExpressionCodec, DurationCodec, Envelope, RelativeOffsetCodec, TemporalCodec, TYPE_KEY,
};
pub use config::{CodecConfig, CodecConfigBuilder, ConfigError, UnknownKeyPolicy};
pub use errors::{CodecError, CodecResult, UnknownVariantError};
pub use registry::{Codec, TaggedRegistry, TemporalKind, TemporalValue};
pub use tempowire_common::{ValidationError, ValidationResult};
pub use tempowire_domain::{CronExpression, Duration, RelativeOffset};
