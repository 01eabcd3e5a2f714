use ffdi_registry::{AuthProvider, EntityKind, Registry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::validate::{EntityRef, ValidationFailure, ValidationGroup, resolve_all};

/// Registered entities that configure the model run itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfigurationEntities {
  /// The registered model run workflow template.
  pub workflow_template: String,
}

impl ModelConfigurationEntities {
  pub fn entity_refs(&self) -> [EntityRef<'_>; 1] {
    [EntityRef {
      field: "workflow_configuration.workflow_template",
      kind: EntityKind::ModelRunWorkflowTemplate,
      id: &self.workflow_template,
    }]
  }

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
    info!("Validating registered workflow configuration entities...");
    resolve_all(
      ValidationGroup::WorkflowConfiguration,
      &self.entity_refs(),
      registry,
      endpoint,
      auth,
    )
    .await
  }

  pub async fn validate_entities<R, A>(&self, registry: &R, endpoint: &str, auth: &A) -> bool
  where
    R: Registry + ?Sized,
    A: AuthProvider + ?Sized,
  {
    self.check_entities(registry, endpoint, auth).await.is_ok()
  }
}
