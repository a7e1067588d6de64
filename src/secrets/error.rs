//! Error types for remote secret store operations.

use thiserror::Error;

/// Result type for secret store operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors reported by a [`SecretStore`](super::SecretStore) implementation.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Failed to reach the secrets backend.
    #[error("Backend connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The backend answered with an error status.
    #[error("Code: {status}. Errors:\n\n{}", format_api_errors(.errors))]
    Api { status: u16, errors: Vec<String> },

    /// Path cannot be addressed on the backend.
    #[error("Invalid secret path: {path} - {reason}")]
    InvalidPath { path: String, reason: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP request failed: {0}")]
    HttpError(String),
}

fn format_api_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return "* (no error details returned)".to_string();
    }
    errors.iter().map(|e| format!("* {}", e)).collect::<Vec<_>>().join("\n")
}

impl SecretsError {
    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: message.into() }
    }

    /// Create an API error from a response status and its `errors` array.
    pub fn api(status: u16, errors: Vec<String>) -> Self {
        Self::Api { status, errors }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into(), reason: reason.into() }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}

impl From<reqwest::Error> for SecretsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::connection_failed(error.to_string())
        } else {
            Self::HttpError(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = SecretsError::connection_failed("timeout");
        assert!(matches!(err, SecretsError::ConnectionFailed { .. }));

        let err = SecretsError::invalid_path("", "path cannot be empty");
        assert!(matches!(err, SecretsError::InvalidPath { .. }));
    }

    #[test]
    fn test_api_error_display() {
        let err = SecretsError::api(403, vec!["permission denied".to_string()]);
        assert_eq!(err.to_string(), "Code: 403. Errors:\n\n* permission denied");

        let err = SecretsError::api(500, vec![]);
        assert!(err.to_string().contains("no error details returned"));
    }
}
