//! Error types for configuration loading

use thiserror::Error;

/// Errors raised while loading or validating an environment record.
///
/// Keys are reported in dotted form (`auth.client_id`) so the diagnostic
/// points at the same name used in config files and environment overrides.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required key is absent or blank
    #[error("Missing required configuration field: {key}")]
    MissingField { key: String },

    /// A URL field is not a usable absolute URL
    #[error("Configuration field {key} is not a valid absolute URL ({value}): {details}")]
    MalformedUrl {
        key: String,
        value: String,
        details: String,
    },

    /// A non-URL field has the wrong shape
    #[error("Invalid value for configuration field {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Configuration sources could not be read or merged
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },
}

impl ConfigurationError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(details: impl Into<String>) -> Self {
        Self::ParseError {
            details: details.into(),
        }
    }

    /// The dotted key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingField { key }
            | Self::MalformedUrl { key, .. }
            | Self::InvalidValue { key, .. } => Some(key),
            Self::ParseError { .. } => None,
        }
    }
}
