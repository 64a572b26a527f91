//! Core utility modules
//!
//! - **[`serde`]**: Serde adapters that route temporal values through their
//!   tagged envelopes

pub mod serde;

pub use self::serde::{cron_expression, relative_delta, time_delta};
