//! Domain-specific error types for ahara

use thiserror::Error;

/// Main error type for the ahara engine
#[derive(Error, Debug)]
pub enum AharaError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Knowledge base error: {message}")]
    Knowledge { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}

impl From<serde_json::Error> for AharaError {
    fn from(err: serde_json::Error) -> Self {
        AharaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AharaError {
    fn from(err: std::io::Error) -> Self {
        AharaError::Io {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AharaError {
    fn from(err: toml::de::Error) -> Self {
        AharaError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias using AharaError
pub type Result<T> = std::result::Result<T, AharaError>;
