use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ffdi_config::{WorkflowConfig, load_config};
use ffdi_registry::{EnvToken, HttpRegistry};

/// Where the example template is written when no command is given.
const DEFAULT_TEMPLATE_PATH: &str = "configs/template.json";

/// ffdi - author and validate hourly FFDI workflow configurations
#[derive(Parser)]
#[command(name = "ffdi")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Write an example configuration with every identifier set to "TODO"
  Template {
    /// Output path
    #[arg(long, short, default_value = DEFAULT_TEMPLATE_PATH)]
    output: PathBuf,
  },

  /// Load a configuration and print it
  Show {
    /// Path to the configuration file (JSON)
    config_file: PathBuf,
  },

  /// Check that every identifier in a configuration is registered
  Validate {
    /// Path to the configuration file (JSON)
    config_file: PathBuf,

    /// Base URL of the registry API
    #[arg(long, env = "FFDI_REGISTRY_ENDPOINT")]
    registry_endpoint: String,

    /// Environment variable holding the bearer token
    #[arg(long, default_value = "FFDI_REGISTRY_TOKEN")]
    token_env: String,
  },
}

fn main() -> Result<ExitCode> {
  init_tracing();

  run(Cli::parse(), Path::new("."))
}

/// Dispatch a parsed command. Relative template paths are resolved against
/// `workdir`.
fn run(cli: Cli, workdir: &Path) -> Result<ExitCode> {
  match cli.command {
    Some(Commands::Template { output }) => write_template(workdir.join(output))?,
    Some(Commands::Show { config_file }) => show(config_file)?,
    Some(Commands::Validate {
      config_file,
      registry_endpoint,
      token_env,
    }) => return validate(config_file, registry_endpoint, token_env),
    None => write_template(workdir.join(DEFAULT_TEMPLATE_PATH))?,
  }

  Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn write_template(output: PathBuf) -> Result<()> {
  WorkflowConfig::dump_example(&output)
    .with_context(|| format!("failed to write template: {}", output.display()))?;

  info!(path = %output.display(), "wrote example config");
  Ok(())
}

fn show(config_file: PathBuf) -> Result<()> {
  let config = load_config(&config_file)?;
  config
    .pretty_print(io::stdout().lock())
    .context("failed to print config")
}

fn validate(config_file: PathBuf, registry_endpoint: String, token_env: String) -> Result<ExitCode> {
  let config = load_config(&config_file)?;
  let registry = HttpRegistry::new();
  let auth = EnvToken::new(token_env);

  let rt = tokio::runtime::Runtime::new()?;
  let valid = rt.block_on(async {
    config
      .validate_entities(&registry, &registry_endpoint, &auth)
      .await
  });

  if valid {
    info!(config = %config_file.display(), "all registered entities resolved");
    Ok(ExitCode::SUCCESS)
  } else {
    error!(config = %config_file.display(), "validation failed");
    Ok(ExitCode::FAILURE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use ffdi_config::EXAMPLE_PLACEHOLDER;
  use tempfile::TempDir;

  #[test]
  fn test_no_command_writes_default_template() {
    let dir = TempDir::new().unwrap();
    let cli = Cli::parse_from(["ffdi"]);

    run(cli, dir.path()).unwrap();

    let written = load_config(dir.path().join("configs").join("template.json")).unwrap();
    assert_eq!(written, WorkflowConfig::example());
    assert_eq!(written.inputs.hourly_temperature, EXAMPLE_PLACEHOLDER);
  }

  #[test]
  fn test_template_command_honours_output() {
    let dir = TempDir::new().unwrap();
    let cli = Cli::parse_from(["ffdi", "template", "--output", "out/custom.json"]);

    run(cli, dir.path()).unwrap();

    assert!(dir.path().join("out/custom.json").exists());
    assert!(!dir.path().join(DEFAULT_TEMPLATE_PATH).exists());
  }

  #[test]
  fn test_show_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let cli = Cli::parse_from([
      "ffdi".to_string(),
      "show".to_string(),
      dir.path().join("missing.json").display().to_string(),
    ]);

    assert!(run(cli, dir.path()).is_err());
  }
}
