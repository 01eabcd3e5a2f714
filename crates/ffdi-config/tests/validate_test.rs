//! Entity validation against a recording mock registry.

use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ffdi_config::{LookupError, ValidationGroup, WorkflowConfig};
use ffdi_registry::{
  AuthError, Credentials, EntityKind, RegisteredEntity, Registry, RegistryError, StaticToken,
};
use tracing_subscriber::fmt::MakeWriter;

const ENDPOINT: &str = "https://registry.example.com";

const SCENARIO: &str = r#"{
  "inputs": {
    "hourly_temperature": "ds1",
    "relative_humidity": "ds2",
    "wind_speed": "ds3",
    "daily_mc_adf": "ds4"
  },
  "associations": { "person": "p1", "organisation": "o1" },
  "workflow_configuration": { "workflow_template": "wt1" }
}"#;

/// Mock registry that records every lookup and fails for unknown ids.
struct MockRegistry {
  missing: HashSet<String>,
  calls: Mutex<Vec<(EntityKind, String)>>,
}

impl MockRegistry {
  fn resolving_all() -> Self {
    Self::missing(&[])
  }

  fn missing(ids: &[&str]) -> Self {
    Self {
      missing: ids.iter().map(|id| id.to_string()).collect(),
      calls: Mutex::new(Vec::new()),
    }
  }

  fn calls(&self) -> Vec<(EntityKind, String)> {
    self.calls.lock().unwrap().clone()
  }

  fn called_ids(&self) -> Vec<String> {
    self.calls().into_iter().map(|(_, id)| id).collect()
  }
}

#[async_trait]
impl Registry for MockRegistry {
  async fn fetch(
    &self,
    kind: EntityKind,
    _endpoint: &str,
    id: &str,
    _credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError> {
    self.calls.lock().unwrap().push((kind, id.to_string()));

    if self.missing.contains(id) {
      return Err(RegistryError::Rejected {
        kind,
        id: id.to_string(),
        details: "not found".to_string(),
      });
    }

    Ok(RegisteredEntity {
      kind,
      id: id.to_string(),
      item: serde_json::json!({ "id": id }),
    })
  }
}

/// In-memory log sink for capturing tracing output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
  fn contents(&self) -> String {
    String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
  }
}

impl io::Write for LogBuffer {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl<'a> MakeWriter<'a> for LogBuffer {
  type Writer = LogBuffer;

  fn make_writer(&'a self) -> Self::Writer {
    self.clone()
  }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
  let buffer = LogBuffer::default();
  let subscriber = tracing_subscriber::fmt()
    .with_writer(buffer.clone())
    .with_ansi(false)
    .with_max_level(tracing::Level::INFO)
    .finish();
  let guard = tracing::subscriber::set_default(subscriber);
  (buffer, guard)
}

fn scenario() -> WorkflowConfig {
  WorkflowConfig::from_json_str(SCENARIO).expect("scenario should parse")
}

#[tokio::test]
async fn test_all_entities_resolve() {
  let registry = MockRegistry::resolving_all();
  let auth = StaticToken::new("token");

  assert!(scenario().validate_entities(&registry, ENDPOINT, &auth).await);

  assert_eq!(
    registry.calls(),
    vec![
      (EntityKind::Dataset, "ds1".to_string()),
      (EntityKind::Dataset, "ds2".to_string()),
      (EntityKind::Dataset, "ds3".to_string()),
      (EntityKind::Dataset, "ds4".to_string()),
      (EntityKind::Person, "p1".to_string()),
      (EntityKind::Organisation, "o1".to_string()),
      (EntityKind::ModelRunWorkflowTemplate, "wt1".to_string()),
    ]
  );
}

#[tokio::test]
async fn test_first_input_failure_short_circuits() {
  let registry = MockRegistry::missing(&["ds1"]);
  let auth = StaticToken::new("token");

  assert!(!scenario().validate_entities(&registry, ENDPOINT, &auth).await);
  assert_eq!(registry.called_ids(), vec!["ds1"]);
}

#[tokio::test]
async fn test_person_failure_skips_organisation_and_template() {
  let registry = MockRegistry::missing(&["p1"]);
  let auth = StaticToken::new("token");

  let result = scenario().check_entities(&registry, ENDPOINT, &auth).await;

  let failure = result.unwrap_err();
  assert_eq!(failure.group, ValidationGroup::Associations);
  assert_eq!(failure.kind, EntityKind::Person);
  assert_eq!(failure.id, "p1");
  assert_eq!(failure.field, "associations.person");
  assert_eq!(
    registry.called_ids(),
    vec!["ds1", "ds2", "ds3", "ds4", "p1"]
  );
}

#[tokio::test]
async fn test_missing_template_fails_after_six_successful_lookups() {
  let registry = MockRegistry::missing(&["wt1"]);
  let auth = StaticToken::new("token");

  assert!(!scenario().validate_entities(&registry, ENDPOINT, &auth).await);

  let calls = registry.calls();
  assert_eq!(calls.len(), 7);
  assert_eq!(
    calls.last(),
    Some(&(EntityKind::ModelRunWorkflowTemplate, "wt1".to_string()))
  );
}

#[tokio::test]
async fn test_auth_provider_called_once_per_lookup() {
  let registry = MockRegistry::resolving_all();
  let issued = AtomicUsize::new(0);
  let auth = || -> Result<Credentials, AuthError> {
    let n = issued.fetch_add(1, Ordering::SeqCst);
    Ok(Credentials::bearer(format!("token-{}", n)))
  };

  assert!(scenario().validate_entities(&registry, ENDPOINT, &auth).await);
  assert_eq!(issued.load(Ordering::SeqCst), 7);
}

#[tokio::test]
async fn test_auth_failure_fails_validation_without_lookup() {
  let registry = MockRegistry::resolving_all();
  let auth = || -> Result<Credentials, AuthError> {
    Err(AuthError::Failed("token endpoint unreachable".to_string()))
  };

  let failure = scenario()
    .check_entities(&registry, ENDPOINT, &auth)
    .await
    .unwrap_err();

  assert!(matches!(failure.source, LookupError::Auth(_)));
  assert_eq!(failure.group, ValidationGroup::Inputs);
  assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn test_group_validation_can_run_on_its_own() {
  let registry = MockRegistry::missing(&["o1"]);
  let auth = StaticToken::new("token");
  let config = scenario();

  assert!(
    config
      .inputs
      .validate_entities(&registry, ENDPOINT, &auth)
      .await
  );
  assert!(
    !config
      .associations
      .validate_entities(&registry, ENDPOINT, &auth)
      .await
  );
  assert!(
    config
      .workflow_configuration
      .validate_entities(&registry, ENDPOINT, &auth)
      .await
  );
}

#[tokio::test]
async fn test_dyn_registry_is_accepted() {
  let registry = MockRegistry::resolving_all();
  let dyn_registry: &dyn Registry = &registry;
  let auth = StaticToken::new("token");

  assert!(
    scenario()
      .validate_entities(dyn_registry, ENDPOINT, &auth)
      .await
  );
}

#[tokio::test]
async fn test_failure_is_logged_with_identifier_and_group() {
  let (logs, _guard) = capture_logs();
  let registry = MockRegistry::missing(&["ds3"]);
  let auth = StaticToken::new("token");

  assert!(!scenario().validate_entities(&registry, ENDPOINT, &auth).await);

  let output = logs.contents();
  assert!(output.contains("Validating registered entities in config"));
  assert!(output.contains("Validating registered input datasets..."));
  assert!(output.contains("id=ds3"));
  assert!(output.contains("not found"));
  assert!(output.contains("Failed inputs validation."));
  assert!(!output.contains("Validating registered associations..."));
}

#[tokio::test]
async fn test_success_logs_every_phase() {
  let (logs, _guard) = capture_logs();
  let registry = MockRegistry::resolving_all();
  let auth = StaticToken::new("token");

  assert!(scenario().validate_entities(&registry, ENDPOINT, &auth).await);

  let output = logs.contents();
  assert!(output.contains("Validating registered input datasets..."));
  assert!(output.contains("Validating registered associations..."));
  assert!(output.contains("Validating registered workflow configuration entities..."));
  assert!(!output.contains("ERROR"));
}
