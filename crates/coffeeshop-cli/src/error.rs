//! Error types for the environment CLI

use color_eyre::eyre::Report;
use coffeeshop_common::ConfigurationError;
use thiserror::Error;

/// CLI error type with minimal variants
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the environment failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// A configuration failure that was already written to stdout as JSON
    #[error("Configuration error: {0}")]
    Reported(ConfigurationError),

    /// Bad user input that clap could not catch
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON output failed
    #[error("Failed to serialize output")]
    Serialization(#[from] serde_json::Error),

    /// Writing to the terminal failed
    #[error("Failed to write output")]
    Io(#[from] std::io::Error),

    /// Everything else (using color-eyre's Report for rich errors)
    #[error(transparent)]
    Internal(#[from] Report),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
