//! Shared error classification for tempowire crates
//!
//! Every error type that crosses a crate boundary implements
//! [`ErrorClassification`], so callers (typically an HTTP layer that maps
//! failures onto status codes) can decide how to react without matching on
//! each concrete error enum.
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Informational, expected conditions | Empty payloads |
//! | **Warning** | Rejected client input | Malformed envelope, unknown tag |
//! | **Error** | Failure requiring attention | Invalid configuration |
//! | **Critical** | System integrity at risk | Internal invariant violations |
//!
//! ## Composing module errors
//!
//! ```rust,ignore
//! #[derive(Debug, Error)]
//! pub enum MyError {
//!     #[error(transparent)]
//!     Validation(#[from] ValidationError),
//! }
//!
//! impl ErrorClassification for MyError {
//!     fn is_retryable(&self) -> bool {
//!         false
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Validation(e) => e.severity(),
//!         }
//!     }
//!
//!     fn is_critical(&self) -> bool {
//!         false
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         None
//!     }
//! }
//! ```

use std::fmt;
use std::time::Duration;

/// Error classification trait for consistent error handling across crates
///
/// Codec failures are deterministic: the same input always fails the same
/// way, so none of the codec errors report themselves as retryable.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient conditions that may succeed if the
    /// same operation is attempted again.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for monitoring, alerting, and logging decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
