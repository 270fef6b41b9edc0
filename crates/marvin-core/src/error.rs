//! Error types for marvin-core

use thiserror::Error;

/// Result type alias using marvin-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Marvin
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable is not set
    #[error("Environment variable {var} is not set. {hint}")]
    MissingEnv { var: &'static str, hint: &'static str },

    /// An environment variable points at something unusable
    #[error("Environment variable {var} is invalid: {message}")]
    InvalidEnv { var: &'static str, message: String },
}

impl Error {
    /// Create a missing environment variable error
    pub fn missing_env(var: &'static str, hint: &'static str) -> Self {
        Self::MissingEnv { var, hint }
    }

    /// Create an invalid environment variable error
    pub fn invalid_env(var: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidEnv {
            var,
            message: message.into(),
        }
    }
}
