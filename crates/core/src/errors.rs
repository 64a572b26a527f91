//! Codec error types

use std::time::Duration;

use tempowire_common::{ErrorClassification, ErrorSeverity, ValidationError};
use thiserror::Error;

/// The `__type` discriminator names no registered variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown temporal variant '{tag}'")]
pub struct UnknownVariantError {
    pub tag: String,
}

impl UnknownVariantError {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Any failure raised while decoding through the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariantError),
}

/// Result type alias for registry operations
pub type CodecResult<T> = Result<T, CodecError>;

impl CodecError {
    /// Stable name of the failure class, for logs and client responses.
    pub fn error_type_name(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UnknownVariant(_) => "unknown_variant",
        }
    }
}

impl ErrorClassification for UnknownVariantError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl ErrorClassification for CodecError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(e) => e.severity(),
            Self::UnknownVariant(e) => e.severity(),
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use tempowire_common::validation::codes;

    use super::*;

    #[test]
    fn test_unknown_variant_display() {
        let err = UnknownVariantError::new("Unknown");
        assert_eq!(err.to_string(), "Unknown temporal variant 'Unknown'");
    }

    #[test]
    fn test_codec_error_is_transparent() {
        let err: CodecError = ValidationError::coded("value", "missing", codes::MISSING_FIELD).into();
        assert_eq!(err.to_string(), "Validation failed: value: missing");
        assert_eq!(err.error_type_name(), "validation");
    }

    #[test]
    fn test_codec_error_classification() {
        let err: CodecError = UnknownVariantError::new("Weekly").into();
        assert!(!err.is_retryable());
        assert!(!err.is_critical());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.error_type_name(), "unknown_variant");
    }
}
