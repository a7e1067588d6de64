//! # Observability
//!
//! Structured logging for the provider. Every lifecycle operation runs inside
//! a `resource_span!` so log lines carry the resource type, operation and
//! secret path.

pub mod logging;

pub use logging::{build_filter, init_logging, log_settings_info};
