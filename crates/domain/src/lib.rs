//! # tempowire Domain
//!
//! Temporal value types exchanged by tempowire codecs.
//!
//! This crate contains:
//! - [`Duration`]: a fixed span of days, seconds and microseconds
//! - [`RelativeOffset`]: a calendar-relative adjustment with absolute-set and
//!   relative-add fields
//! - [`CronExpression`]: an opaque cron schedule string, with opt-in grammar
//!   parsing into a [`CronSchedule`]
//! - Domain error types
//!
//! ## Architecture
//! - No dependencies on other tempowire crates
//! - Knows nothing about the wire representation; encoding lives in
//!   `tempowire-core`
//! - All values are immutable and `Send + Sync`

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
