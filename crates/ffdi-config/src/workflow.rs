use std::fs;
use std::io::{self, Write};
use std::path::Path;

use ffdi_registry::{AuthProvider, Registry};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::associations::ModelAssociations;
use crate::entities::ModelConfigurationEntities;
use crate::error::{ConfigError, SchemaError};
use crate::inputs::ModelInputs;
use crate::validate::{EntityRef, ValidationFailure};

/// Value written into every identifier field of the example template.
pub const EXAMPLE_PLACEHOLDER: &str = "TODO";

/// Top level configuration of an hourly FFDI model run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowConfig {
  pub inputs: ModelInputs,
  pub associations: ModelAssociations,
  pub workflow_configuration: ModelConfigurationEntities,
}

impl WorkflowConfig {
  /// A template with every identifier set to [`EXAMPLE_PLACEHOLDER`].
  pub fn example() -> Self {
    let todo = || EXAMPLE_PLACEHOLDER.to_string();
    Self {
      inputs: ModelInputs {
        hourly_temperature: todo(),
        relative_humidity: todo(),
        wind_speed: todo(),
        daily_mc_adf: todo(),
      },
      associations: ModelAssociations {
        person: todo(),
        organisation: todo(),
      },
      workflow_configuration: ModelConfigurationEntities {
        workflow_template: todo(),
      },
    }
  }

  /// Parse and structurally validate a JSON document.
  pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
    let config: WorkflowConfig = serde_json::from_str(content)?;
    config.check_structure()?;
    Ok(config)
  }

  /// Every identifier in the document, in validation order.
  pub fn entity_refs(&self) -> Vec<EntityRef<'_>> {
    let mut refs = Vec::with_capacity(7);
    refs.extend(self.inputs.entity_refs());
    refs.extend(self.associations.entity_refs());
    refs.extend(self.workflow_configuration.entity_refs());
    refs
  }

  /// Reject identifiers that are empty or whitespace.
  pub fn check_structure(&self) -> Result<(), SchemaError> {
    match self.entity_refs().iter().find(|r| r.id.trim().is_empty()) {
      Some(r) => Err(SchemaError::EmptyField {
        field: r.field.to_string(),
      }),
      None => Ok(()),
    }
  }

  /// Write the example template to `path` as indented JSON.
  pub fn dump_example(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    Self::example().write_to(path)
  }

  /// Write this document to `path` as indented JSON, creating parent
  /// directories as needed.
  pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let content = self.to_pretty_json()?;

    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
      })?;
    }

    fs::write(path, content).map_err(|source| ConfigError::Write {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }

  /// Print the document as indented JSON.
  pub fn pretty_print(&self, mut out: impl Write) -> io::Result<()> {
    let content = self.to_pretty_json().map_err(io::Error::other)?;
    writeln!(out, "{}", content)
  }

  /// Check every referenced entity against the registry.
  ///
  /// Groups run in order inputs, associations, workflow configuration; the
  /// first identifier that fails to resolve ends validation.
  pub async fn check_entities<R, A>(
    &self,
    registry: &R,
    endpoint: &str,
    auth: &A,
  ) -> Result<(), ValidationFailure>
  where
    R: Registry + ?Sized,
    A: AuthProvider + ?Sized,
  {
    info!("Validating registered entities in config");

    self
      .inputs
      .check_entities(registry, endpoint, auth)
      .await
      .inspect_err(|_| error!("Failed inputs validation."))?;

    self
      .associations
      .check_entities(registry, endpoint, auth)
      .await
      .inspect_err(|_| error!("Failed associations validation."))?;

    self
      .workflow_configuration
      .check_entities(registry, endpoint, auth)
      .await
      .inspect_err(|_| error!("Failed workflow configuration validation."))?;

    Ok(())
  }

  /// Like [`WorkflowConfig::check_entities`], collapsed to a boolean. The
  /// reason for a failure is only available in the log.
  pub async fn validate_entities<R, A>(&self, registry: &R, endpoint: &str, auth: &A) -> bool
  where
    R: Registry + ?Sized,
    A: AuthProvider + ?Sized,
  {
    self.check_entities(registry, endpoint, auth).await.is_ok()
  }
}

/// Load a configuration file and check its shape.
pub fn load_config(path: impl AsRef<Path>) -> Result<WorkflowConfig, ConfigError> {
  let path = path.as_ref();
  let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  WorkflowConfig::from_json_str(&content).map_err(|source| ConfigError::Invalid {
    path: path.to_path_buf(),
    source,
  })
}
