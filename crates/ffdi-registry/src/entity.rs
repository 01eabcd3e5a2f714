use std::fmt;

/// The kinds of registered entity a workflow configuration can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Dataset,
  Person,
  Organisation,
  ModelRunWorkflowTemplate,
}

impl EntityKind {
  /// Human readable name used in diagnostics.
  pub fn label(&self) -> &'static str {
    match self {
      EntityKind::Dataset => "Dataset",
      EntityKind::Person => "Person",
      EntityKind::Organisation => "Organisation",
      EntityKind::ModelRunWorkflowTemplate => "Model Run Workflow Template",
    }
  }

  /// Path of the fetch operation relative to the registry endpoint.
  pub fn fetch_route(&self) -> &'static str {
    match self {
      EntityKind::Dataset => "registry/entity/dataset/fetch",
      EntityKind::Person => "registry/agent/person/fetch",
      EntityKind::Organisation => "registry/agent/organisation/fetch",
      EntityKind::ModelRunWorkflowTemplate => "registry/entity/model_run_workflow/fetch",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// An entity returned by a successful registry lookup.
///
/// The item payload is kept as raw JSON; callers that only care about
/// existence never look inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredEntity {
  pub kind: EntityKind,
  pub id: String,
  pub item: serde_json::Value,
}
