use std::fmt;

use ffdi_registry::{AuthError, AuthProvider, EntityKind, Registry, RegistryError};
use thiserror::Error;
use tracing::error;

/// One identifier field of the document, tagged with the registry kind it
/// must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef<'a> {
  pub field: &'static str,
  pub kind: EntityKind,
  pub id: &'a str,
}

/// The groups of the document, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGroup {
  Inputs,
  Associations,
  WorkflowConfiguration,
}

impl fmt::Display for ValidationGroup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationGroup::Inputs => f.write_str("inputs"),
      ValidationGroup::Associations => f.write_str("associations"),
      ValidationGroup::WorkflowConfiguration => f.write_str("workflow configuration"),
    }
  }
}

/// Why a single lookup did not resolve.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error(transparent)]
  Auth(#[from] AuthError),

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

/// The first identifier that failed to resolve during entity validation.
#[derive(Debug, Error)]
#[error("{group} validation failed: {kind} '{id}' could not be resolved: {source}")]
pub struct ValidationFailure {
  pub group: ValidationGroup,
  pub field: &'static str,
  pub kind: EntityKind,
  pub id: String,
  pub source: LookupError,
}

/// Resolve each reference in order, stopping at the first failure.
///
/// Credentials are requested once per lookup.
pub(crate) async fn resolve_all<R, A>(
  group: ValidationGroup,
  refs: &[EntityRef<'_>],
  registry: &R,
  endpoint: &str,
  auth: &A,
) -> Result<(), ValidationFailure>
where
  R: Registry + ?Sized,
  A: AuthProvider + ?Sized,
{
  for entity in refs {
    if let Err(source) = resolve_one(entity, registry, endpoint, auth).await {
      error!(
        kind = %entity.kind,
        id = %entity.id,
        error = %source,
        "encountered error while validating {}",
        entity.kind
      );
      return Err(ValidationFailure {
        group,
        field: entity.field,
        kind: entity.kind,
        id: entity.id.to_string(),
        source,
      });
    }
  }
  Ok(())
}

async fn resolve_one<R, A>(
  entity: &EntityRef<'_>,
  registry: &R,
  endpoint: &str,
  auth: &A,
) -> Result<(), LookupError>
where
  R: Registry + ?Sized,
  A: AuthProvider + ?Sized,
{
  let credentials = auth.credentials()?;
  let id = entity.id;

  match entity.kind {
    EntityKind::Dataset => registry.fetch_dataset(endpoint, id, &credentials).await?,
    EntityKind::Person => registry.fetch_person(endpoint, id, &credentials).await?,
    EntityKind::Organisation => {
      registry
        .fetch_organisation(endpoint, id, &credentials)
        .await?
    }
    EntityKind::ModelRunWorkflowTemplate => {
      registry
        .fetch_model_run_workflow_template(endpoint, id, &credentials)
        .await?
    }
  };

  Ok(())
}
