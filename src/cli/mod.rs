//! # Command Line Interface
//!
//! Drives the `vault_generic_secret` handlers from declaration and state
//! files, for operators and smoke tests against a real Vault.

pub mod files;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use crate::config::{load_settings, ProviderSettings};
use crate::observability::{init_logging, log_settings_info};
use crate::resource::{
    GenericSecretField, GenericSecretResource, ProviderContext, ResourceData, ResourceHandler,
};
use crate::validation::canonicalize_data_json;
use output::{print_output, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "vault-generic-secret")]
#[command(about = "Manage vault_generic_secret resources from declaration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (YAML, JSON or TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resource schema
    Schema,

    /// Validate a declaration without contacting Vault
    Validate {
        /// Declaration file
        file: PathBuf,
    },

    /// Print the canonical form of a data_json document
    Normalize {
        /// JSON text; read from --file when omitted
        data_json: Option<String>,

        /// File holding the JSON document
        #[arg(long, conflicts_with = "data_json")]
        file: Option<PathBuf>,
    },

    /// Write the declared secret to Vault
    Apply {
        /// Declaration file
        file: PathBuf,

        /// State file to update
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Refresh stored state from Vault
    Refresh {
        /// State file
        state: PathBuf,
    },

    /// Delete the secret recorded in a state file
    Destroy {
        /// State file
        state: PathBuf,
    },

    /// Adopt an existing secret by path
    Import {
        /// Full path of the existing secret
        id: String,

        /// State file to create
        #[arg(long)]
        state: Option<PathBuf>,
    },
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if cli.verbose {
        settings.observability.log_level = "debug".to_string();
    }
    init_logging(&settings.observability)?;
    log_settings_info(&settings);

    let result = execute(cli.command, &settings).await?;
    print_output(&result, cli.output)
}

/// Execute a command and return the value to print
pub async fn execute(command: Commands, settings: &ProviderSettings) -> anyhow::Result<Value> {
    let resource = GenericSecretResource::new();

    match command {
        Commands::Schema => Ok(serde_json::to_value(resource.schema())?),
        Commands::Validate { file } => {
            let config = files::load_declaration(&file)?;
            let data = resource.prepare(config)?;
            Ok(json!({ "valid": true, "path": data.path(), "data_json": data.data_json() }))
        }
        Commands::Normalize { data_json, file } => {
            let input = match (data_json, file) {
                (Some(text), _) => text,
                (None, Some(file)) => std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?,
                (None, None) => anyhow::bail!("Provide data_json or --file"),
            };
            Ok(Value::String(canonicalize_data_json(&input)?))
        }
        Commands::Apply { file, state } => {
            let config = files::load_declaration(&file)?;
            let mut data = resource.prepare(config)?;
            let ctx = ProviderContext::configure(&settings.vault).await?;

            apply_declaration(&resource, &ctx, &mut data, state.as_deref()).await?;
            persist(state.as_deref(), &data)?;
            Ok(serde_json::to_value(&data)?)
        }
        Commands::Refresh { state } => {
            let mut data = require_state(&state)?;
            let ctx = ProviderContext::configure(&settings.vault).await?;

            ResourceHandler::read(&resource, &mut data, &ctx).await?;
            files::save_state(&state, &data)?;
            Ok(serde_json::to_value(&data)?)
        }
        Commands::Destroy { state } => {
            let mut data = require_state(&state)?;
            let ctx = ProviderContext::configure(&settings.vault).await?;

            ResourceHandler::delete(&resource, &mut data, &ctx).await?;
            files::save_state(&state, &data)?;
            Ok(serde_json::to_value(&data)?)
        }
        Commands::Import { id, state } => {
            let mut data = ResourceHandler::import(&resource, &id)?;
            let ctx = ProviderContext::configure(&settings.vault).await?;

            ResourceHandler::read(&resource, &mut data, &ctx).await?;
            if data.id().is_none() {
                anyhow::bail!("Cannot import non-existent secret {:?}", id);
            }
            persist(state.as_deref(), &data)?;
            Ok(serde_json::to_value(&data)?)
        }
    }
}

/// Create, update or replace depending on the prior state in `state`.
///
/// On replace the old secret is deleted and the cleared state is saved
/// before the new path is written, so a failed create never leaves a state
/// file pointing at a deleted secret.
pub async fn apply_declaration(
    resource: &GenericSecretResource,
    ctx: &ProviderContext,
    data: &mut ResourceData,
    state: Option<&Path>,
) -> anyhow::Result<()> {
    let prior = match state {
        Some(path) => files::load_state(path)?,
        None => None,
    };

    match prior {
        Some(mut old) if old.id().is_some() => {
            if old.path() != data.path() && resource.schema().forces_new(GenericSecretField::Path) {
                tracing::info!(
                    old_path = %old.path(),
                    new_path = %data.path(),
                    "Path changed, replacing generic Vault secret"
                );
                resource.delete(&mut old, ctx).await?;
                persist(state, &old)?;
                resource.create(data, ctx).await?;
            } else {
                resource.update(data, ctx).await?;
            }
        }
        _ => resource.create(data, ctx).await?,
    }
    Ok(())
}

fn require_state(path: &Path) -> anyhow::Result<ResourceData> {
    files::load_state(path)?
        .with_context(|| format!("State file {} does not exist", path.display()))
}

fn persist(state: Option<&Path>, data: &ResourceData) -> anyhow::Result<()> {
    if let Some(path) = state {
        files::save_state(path, data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from([
            "vault-generic-secret",
            "apply",
            "secret.yaml",
            "--state",
            "s.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Apply { ref state, .. } if state.is_some()));
        assert_eq!(cli.output, OutputFormat::Json);

        let cli = Cli::try_parse_from(["vault-generic-secret", "-o", "yaml", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
        assert_eq!(cli.output, OutputFormat::Yaml);

        let cli =
            Cli::try_parse_from(["vault-generic-secret", "normalize", "{}", "--file", "x.json"]);
        assert!(cli.is_err());
    }

    #[tokio::test]
    async fn test_execute_schema() {
        let value = execute(Commands::Schema, &ProviderSettings::default()).await.unwrap();
        assert_eq!(value["type_name"], "vault_generic_secret");
        assert_eq!(value["attributes"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_execute_normalize() {
        let input = r#"{ "b": 1, "a": [2, 1] }"#;
        let command = Commands::Normalize { data_json: Some(input.into()), file: None };
        let value = execute(command, &ProviderSettings::default()).await.unwrap();
        assert_eq!(value, Value::String(r#"{"a":[2,1],"b":1}"#.to_string()));

        let command = Commands::Normalize { data_json: Some("[1]".into()), file: None };
        assert!(execute(command, &ProviderSettings::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_execute_validate() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.yaml");
        std::fs::write(&good, "path: secret/foo\ndata_json: '{\"b\": 1, \"a\": 2}'\n").unwrap();

        let settings = ProviderSettings::default();
        let value = execute(Commands::Validate { file: good }, &settings).await.unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["data_json"], r#"{"a":2,"b":1}"#);

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "path: secret/foo\ndata_json: '[1, 2]'\n").unwrap();
        let err = execute(Commands::Validate { file: bad }, &settings).await.unwrap_err();
        assert!(err.to_string().contains("data_json must be a JSON object"));
    }

    #[tokio::test]
    async fn test_refresh_requires_state_file() {
        let dir = TempDir::new().unwrap();
        let command = Commands::Refresh { state: dir.path().join("missing.json") };

        let err = execute(command, &ProviderSettings::default()).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
