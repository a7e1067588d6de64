//! Output formatting for CLI commands
//!
//! Results are printed as JSON by default, or as YAML on request.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render data in the given format
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).context("Failed to serialize to JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(data).context("Failed to serialize to YAML"),
    }
}

/// Print data in the given format
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render(data, format)?.trim_end());
    Ok(())
}
