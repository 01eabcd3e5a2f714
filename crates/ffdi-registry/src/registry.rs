use async_trait::async_trait;

use crate::auth::Credentials;
use crate::entity::{EntityKind, RegisteredEntity};
use crate::error::RegistryError;

/// Identifier lookup contract of the metadata registry.
///
/// Implementors only provide [`Registry::fetch`]; the per-kind operations
/// delegate to it.
#[async_trait]
pub trait Registry: Send + Sync {
  /// Fetch an entity of the given kind by identifier.
  ///
  /// Any error (not found, unauthorised, transport) means the identifier
  /// could not be resolved.
  async fn fetch(
    &self,
    kind: EntityKind,
    endpoint: &str,
    id: &str,
    credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError>;

  async fn fetch_dataset(
    &self,
    endpoint: &str,
    id: &str,
    credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError> {
    self
      .fetch(EntityKind::Dataset, endpoint, id, credentials)
      .await
  }

  async fn fetch_person(
    &self,
    endpoint: &str,
    id: &str,
    credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError> {
    self
      .fetch(EntityKind::Person, endpoint, id, credentials)
      .await
  }

  async fn fetch_organisation(
    &self,
    endpoint: &str,
    id: &str,
    credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError> {
    self
      .fetch(EntityKind::Organisation, endpoint, id, credentials)
      .await
  }

  async fn fetch_model_run_workflow_template(
    &self,
    endpoint: &str,
    id: &str,
    credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError> {
    self
      .fetch(EntityKind::ModelRunWorkflowTemplate, endpoint, id, credentials)
      .await
  }
}
