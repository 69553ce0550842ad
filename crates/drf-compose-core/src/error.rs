//! Error types for drf-compose-core

use thiserror::Error;

/// Result type alias using drf-compose-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for drf-compose
#[derive(Error, Debug)]
pub enum Error {
    /// Compose file not found
    #[error("Compose file not found: {path}")]
    ComposeNotFound { path: String },

    /// YAML parsing error
    #[error("Error parsing compose file: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("Error parsing compose file: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A required key is missing or has the wrong shape
    #[error("{message}")]
    Validation { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template context error
    #[error("Template error: {0}")]
    Template(String),
}

impl Error {
    /// Create a compose not found error
    pub fn compose_not_found(path: impl Into<String>) -> Self {
        Self::ComposeNotFound { path: path.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error came from the schema validator
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this error came from parsing the compose file
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::YamlParse(_) | Self::JsonParse(_))
    }
}
