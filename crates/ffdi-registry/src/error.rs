use thiserror::Error;

use crate::entity::EntityKind;

/// Errors that can occur while looking up an entity in the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
  /// Transport level failure (connection refused, TLS, timeout, ...).
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The registry answered with a non-success status code.
  #[error("registry returned status {status} for {kind} '{id}'")]
  Status {
    kind: EntityKind,
    id: String,
    status: u16,
  },

  /// The registry answered but reported the lookup as unsuccessful.
  #[error("registry rejected {kind} '{id}': {details}")]
  Rejected {
    kind: EntityKind,
    id: String,
    details: String,
  },

  /// The response body could not be decoded.
  #[error("invalid registry response: {0}")]
  InvalidResponse(#[from] serde_json::Error),

  /// The configured endpoint is not a usable base URL.
  #[error("invalid registry endpoint '{endpoint}': {message}")]
  InvalidEndpoint { endpoint: String, message: String },
}

/// Errors raised by an auth provider while producing credentials.
#[derive(Debug, Error)]
pub enum AuthError {
  /// The token source has no token to hand out.
  #[error("no bearer token available: {0}")]
  Missing(String),

  /// The token source failed for another reason.
  #[error("failed to acquire bearer token: {0}")]
  Failed(String),
}
