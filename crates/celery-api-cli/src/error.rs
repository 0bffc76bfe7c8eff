//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use celery_api_core::{ConfigError, CookbookError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cookbook metadata failed to load or validate.
    #[error("Cookbook error: {0}")]
    Cookbook(String),

    /// The server or broker failed.
    #[error("Server error: {0}")]
    Server(String),

    /// Output could not be produced.
    #[error("{0}")]
    Internal(String),
}

impl CliError {
    /// Map error to an exit code (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Cookbook(_) => 65, // EX_DATAERR
            Self::Server(_) => 69,   // EX_UNAVAILABLE
            Self::Internal(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CookbookError> for CliError {
    fn from(err: CookbookError) -> Self {
        Self::Cookbook(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
