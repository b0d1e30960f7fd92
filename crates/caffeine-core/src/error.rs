//! Core error types for caffeine-core.
//!
//! The decay computation itself never fails; everything here belongs to the
//! layers around it (configuration, input loading, the REST client).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for caffeine-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// REST API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// File was read but is not valid TOML for this schema
    #[error("Failed to parse configuration at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },
}

/// Validation errors raised while accepting intake data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Caffeine amount is negative or not a finite number
    #[error("Invalid caffeine amount at record {index}: {amount} mg")]
    InvalidAmount { index: usize, amount: f64 },

    /// Time range name not recognised
    #[error("Unknown time range '{0}' (expected 1d, 7d or 30d)")]
    UnknownTimeRange(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// REST API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Base URL or endpoint could not be built
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Endpoint requires a token and none is configured
    #[error("Not authenticated: set api.token in the configuration")]
    NotAuthenticated,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::UnknownTimeRange("2w".into()).into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("2w"));
    }

    #[test]
    fn status_error_message_names_url() {
        let err = ApiError::Status {
            status: 401,
            url: "http://localhost/api/caffeine/logs".into(),
        };
        assert_eq!(err.to_string(), "HTTP 401 from http://localhost/api/caffeine/logs");
    }
}
