//! # Error Types
//!
//! Error types for the `vault_generic_secret` resource using `thiserror`.

use std::fmt;

use crate::secrets::SecretsError;

/// Custom result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Main error type for the resource handlers and their configuration
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// Declared configuration rejected before any remote call
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// `data_json` could not be decoded by the write handler
    #[error("data_json {input:?} syntax error: {source}")]
    DataJsonSyntax {
        input: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote secret store rejected or failed an operation
    #[error("{}", render_remote(.operation, .path, .source))]
    Remote {
        operation: RemoteOperation,
        path: String,
        #[source]
        source: SecretsError,
    },

    /// Serialization/deserialization errors
    #[error("{context}: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Faults that validation should have ruled out
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Remote call that produced a [`ProviderError::Remote`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    Write,
    Read,
    Delete,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteOperation::Write => write!(f, "write"),
            RemoteOperation::Read => write!(f, "read"),
            RemoteOperation::Delete => write!(f, "delete"),
        }
    }
}

fn render_remote(operation: &RemoteOperation, path: &str, source: &SecretsError) -> String {
    match operation {
        RemoteOperation::Write => format!("error writing to Vault: {}", source),
        RemoteOperation::Read => format!("error reading from Vault: {}", source),
        RemoteOperation::Delete => {
            format!("error deleting {:?} from Vault: {:?}", path, source.to_string())
        }
    }
}

impl ProviderError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a data_json syntax error
    pub fn data_json_syntax<S: Into<String>>(input: S, source: serde_json::Error) -> Self {
        Self::DataJsonSyntax { input: input.into(), source }
    }

    /// Wrap a secret store failure with the operation and path
    pub fn remote<P: Into<String>>(
        operation: RemoteOperation,
        path: P,
        source: SecretsError,
    ) -> Self {
        Self::Remote { operation, path: path.into(), source }
    }

    /// Create a serialization error with context
    pub fn serialization<S: Into<String>>(context: S, source: serde_json::Error) -> Self {
        Self::Serialization { source, context: context.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create an I/O error with context
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io { source, context: context.into() }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}

impl From<config::ConfigError> for ProviderError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for ProviderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        // Nested struct errors are not listed by field_errors()
        let message = if message.is_empty() { errors.to_string() } else { message };

        Self::config(format!("Validation failed: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ProviderError::validation_field("must be a JSON object", "data_json");
        assert!(matches!(error, ProviderError::Validation { .. }));
        assert_eq!(error.to_string(), "Validation error: must be a JSON object");
        if let ProviderError::Validation { field, .. } = error {
            assert_eq!(field, Some("data_json".to_string()));
        }
    }

    #[test]
    fn test_data_json_syntax_names_input() {
        let source = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error = ProviderError::data_json_syntax("{invalid", source);
        let message = error.to_string();
        assert!(message.starts_with("data_json \"{invalid\" syntax error: "));
    }

    #[test]
    fn test_remote_error_rendering() {
        let err = ProviderError::remote(
            RemoteOperation::Write,
            "secret/foo",
            SecretsError::connection_failed("connection refused"),
        );
        assert_eq!(
            err.to_string(),
            "error writing to Vault: Backend connection failed: connection refused"
        );

        let err = ProviderError::remote(
            RemoteOperation::Delete,
            "secret/foo",
            SecretsError::connection_failed("timeout"),
        );
        assert_eq!(
            err.to_string(),
            "error deleting \"secret/foo\" from Vault: \"Backend connection failed: timeout\""
        );

        let err = ProviderError::remote(
            RemoteOperation::Read,
            "secret/foo",
            SecretsError::api(403, vec!["permission denied".to_string()]),
        );
        assert!(err.to_string().starts_with("error reading from Vault: "));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let provider_error: ProviderError = io_error.into();
        assert!(matches!(provider_error, ProviderError::Io { .. }));

        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let provider_error: ProviderError = json_error.into();
        assert!(matches!(provider_error, ProviderError::Serialization { .. }));
    }

    #[test]
    fn test_remote_operation_display() {
        assert_eq!(RemoteOperation::Write.to_string(), "write");
        assert_eq!(RemoteOperation::Read.to_string(), "read");
        assert_eq!(RemoteOperation::Delete.to_string(), "delete");
    }
}
