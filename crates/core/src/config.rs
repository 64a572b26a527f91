//! Codec configuration
//!
//! The defaults implement the strict wire contract; a deployment that must
//! accept payloads from lenient clients can relax them.
//!
//! ## Loading Strategy
//! - [`CodecConfig::from_toml_str`] / [`CodecConfig::from_json_str`] for a
//!   `[codec]`-style section already read by the host application
//! - [`CodecConfig::from_env`] for environment overrides on top of defaults
//!
//! ## Environment Variables
//! - `TEMPOWIRE_UNKNOWN_KEYS`: `reject` or `ignore`
//! - `TEMPOWIRE_ENFORCE_TYPE_TAG`: `true` or `false`
//! - `TEMPOWIRE_ACCEPT_INTEGRAL_FLOATS`: `true` or `false`

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tempowire_common::{ErrorClassification, ErrorSeverity};
use thiserror::Error;

const ENV_UNKNOWN_KEYS: &str = "TEMPOWIRE_UNKNOWN_KEYS";
const ENV_ENFORCE_TYPE_TAG: &str = "TEMPOWIRE_ENFORCE_TYPE_TAG";
const ENV_ACCEPT_INTEGRAL_FLOATS: &str = "TEMPOWIRE_ACCEPT_INTEGRAL_FLOATS";

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidVar { name: &'static str, value: String },
}

impl ErrorClassification for ConfigError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// What decoders do with keys that are not part of a variant's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Fail with a validation error naming each unknown key
    #[default]
    Reject,
    /// Skip unknown keys
    Ignore,
}

impl FromStr for UnknownKeyPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            _ => Err(()),
        }
    }
}

/// Configuration for codec decode behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Handling of keys outside the variant's shape (`__type` is always
    /// accepted)
    pub unknown_keys: UnknownKeyPolicy,

    /// Require `__type` on direct codec decode and check it names the codec
    pub enforce_type_tag: bool,

    /// Treat floats without a fractional part (`12.0`) as integers
    pub accept_integral_floats: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            unknown_keys: UnknownKeyPolicy::Reject,
            enforce_type_tag: false,
            accept_integral_floats: true,
        }
    }
}

impl CodecConfig {
    /// Create a new configuration builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Quick preset that ignores unknown keys
    pub fn lenient() -> Self {
        Self { unknown_keys: UnknownKeyPolicy::Ignore, ..Self::default() }
    }

    /// Quick preset that additionally pins `__type` and rejects floats
    pub fn strict() -> Self {
        Self {
            unknown_keys: UnknownKeyPolicy::Reject,
            enforce_type_tag: true,
            accept_integral_floats: false,
        }
    }

    /// Parse from TOML text; absent keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] for malformed text, unknown keys or
    /// mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse from JSON text; absent keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] for malformed text, unknown keys or
    /// mistyped values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from the process environment; unset variables keep defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if a variable is set to an
    /// unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source; see [`CodecConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_UNKNOWN_KEYS) {
            config.unknown_keys = value
                .parse()
                .map_err(|()| ConfigError::InvalidVar { name: ENV_UNKNOWN_KEYS, value })?;
        }
        if let Some(value) = lookup(ENV_ENFORCE_TYPE_TAG) {
            config.enforce_type_tag = parse_bool(ENV_ENFORCE_TYPE_TAG, value)?;
        }
        if let Some(value) = lookup(ENV_ACCEPT_INTEGRAL_FLOATS) {
            config.accept_integral_floats = parse_bool(ENV_ACCEPT_INTEGRAL_FLOATS, value)?;
        }

        tracing::debug!(?config, "Codec configuration loaded from environment");
        Ok(config)
    }
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidVar { name, value }),
    }
}

/// Builder for CodecConfig with fluent API
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the handling of keys outside a variant's shape.
    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.config.unknown_keys = policy;
        self
    }

    /// Require and check `__type` on direct codec decode.
    pub fn enforce_type_tag(mut self, enforce: bool) -> Self {
        self.config.enforce_type_tag = enforce;
        self
    }

    /// Accept floats without a fractional part as integers.
    pub fn accept_integral_floats(mut self, accept: bool) -> Self {
        self.config.accept_integral_floats = accept;
        self
    }

    /// Finish building.
    pub fn build(self) -> CodecConfig {
        self.config
    }
}
