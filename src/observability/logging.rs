//! # Structured Logging
//!
//! Subscriber setup and span macros built on the tracing ecosystem. `RUST_LOG`
//! takes precedence over the configured log level so operators can raise
//! verbosity for a single run.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ObservabilityConfig, ProviderSettings};
use crate::errors::{ProviderError, Result};

/// Create a tracing span for a resource lifecycle operation.
///
/// ```rust,ignore
/// let span = resource_span!("write", "secret/foo");
/// let span = resource_span!("read", "secret/foo", allow_read = true);
/// ```
#[macro_export]
macro_rules! resource_span {
    ($operation:expr, $path:expr) => {
        tracing::info_span!(
            "resource_operation",
            resource_type = $crate::resource::RESOURCE_TYPE,
            operation = %$operation,
            path = %$path,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "resource_operation",
            resource_type = $crate::resource::RESOURCE_TYPE,
            operation = %$operation,
            path = %$path,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Install the global fmt subscriber.
///
/// Returns `Ok` when a subscriber is already installed, as happens when tests
/// or an embedding host set one up first.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = if config.json_logging {
        fmt().json().with_env_filter(filter).with_writer(std::io::stderr).try_init()
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global tracing subscriber already set; keeping existing one");
    }
    Ok(())
}

/// Filter for the fmt subscriber: `RUST_LOG` when set, else the configured level
pub fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    parse_level(&config.log_level)
}

fn parse_level(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level)
        .map_err(|e| ProviderError::config(format!("Invalid log level '{}': {}", log_level, e)))
}

/// Log the effective settings at startup
pub fn log_settings_info(settings: &ProviderSettings) {
    tracing::info!(
        vault_address = %settings.vault.address,
        namespace = ?settings.vault.namespace,
        token_configured = settings.vault.token.as_ref().is_some_and(|t| !t.is_empty()),
        timeout_seconds = settings.vault.timeout_seconds,
        json_logging = settings.observability.json_logging,
        "vault_generic_secret provider configuration"
    );
}
