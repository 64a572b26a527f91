//! Error types used by the domain value types

use thiserror::Error;

/// Failure to apply a [`RelativeOffset`](crate::RelativeOffset) to a
/// datetime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OffsetApplyError {
    #[error("Invalid {field} value: {value}")]
    InvalidField { field: &'static str, value: i64 },

    #[error("Resulting datetime is outside the supported range")]
    OutOfRange,
}

/// Error type for cron parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CronParseError {
    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Too many fields: expected 5 or 6, got {0}")]
    TooManyFields(usize),

    #[error("Too few fields: expected 5 or 6, got {0}")]
    TooFewFields(usize),
}
