use ffdi_registry::{AuthProvider, EntityKind, Registry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::validate::{EntityRef, ValidationFailure, ValidationGroup, resolve_all};

/// The datasets the model run reads.
///
/// Each value is the handle of a registered Dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelInputs {
  /// Hourly temperature (°C) grid.
  pub hourly_temperature: String,
  /// Hourly relative humidity (%) grid.
  pub relative_humidity: String,
  /// Hourly wind speed (m/s) grid.
  pub wind_speed: String,
  /// Daily McArthur drought factor grid.
  pub daily_mc_adf: String,
}

impl ModelInputs {
  /// Identifier fields in validation order.
  pub fn entity_refs(&self) -> [EntityRef<'_>; 4] {
    [
      EntityRef {
        field: "inputs.hourly_temperature",
        kind: EntityKind::Dataset,
        id: &self.hourly_temperature,
      },
      EntityRef {
        field: "inputs.relative_humidity",
        kind: EntityKind::Dataset,
        id: &self.relative_humidity,
      },
      EntityRef {
        field: "inputs.wind_speed",
        kind: EntityKind::Dataset,
        id: &self.wind_speed,
      },
      EntityRef {
        field: "inputs.daily_mc_adf",
        kind: EntityKind::Dataset,
        id: &self.daily_mc_adf,
      },
    ]
  }

  /// Check that every input dataset is registered.
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
    info!("Validating registered input datasets...");
    resolve_all(
      ValidationGroup::Inputs,
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
