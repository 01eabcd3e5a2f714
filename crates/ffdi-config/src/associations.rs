use ffdi_registry::{AuthProvider, EntityKind, Registry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::validate::{EntityRef, ValidationFailure, ValidationGroup, resolve_all};

/// Links the model run to the registered person and organisation
/// responsible for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelAssociations {
  pub person: String,
  pub organisation: String,
}

impl ModelAssociations {
  /// Identifier fields in validation order: people before organisations.
  pub fn entity_refs(&self) -> [EntityRef<'_>; 2] {
    [
      EntityRef {
        field: "associations.person",
        kind: EntityKind::Person,
        id: &self.person,
      },
      EntityRef {
        field: "associations.organisation",
        kind: EntityKind::Organisation,
        id: &self.organisation,
      },
    ]
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
    info!("Validating registered associations...");
    resolve_all(
      ValidationGroup::Associations,
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
