use std::path::{Path, PathBuf};

use thiserror::Error;

/// Problems with the shape of a configuration document.
#[derive(Debug, Error)]
pub enum SchemaError {
  /// Not JSON, or a required field is missing, mistyped or unknown.
  #[error("{0}")]
  Json(#[from] serde_json::Error),

  /// An identifier field is present but empty.
  #[error("field '{field}' must be a non-empty registry identifier")]
  EmptyField { field: String },
}

/// Errors raised while loading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config from {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to load config from {}: {source}", .path.display())]
  Invalid { path: PathBuf, source: SchemaError },

  #[error("failed to write config to {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to serialize config: {0}")]
  Serialize(#[from] serde_json::Error),
}

impl ConfigError {
  /// Path of the file involved, if any.
  pub fn path(&self) -> Option<&Path> {
    match self {
      ConfigError::Read { path, .. }
      | ConfigError::Invalid { path, .. }
      | ConfigError::Write { path, .. } => Some(path.as_path()),
      ConfigError::Serialize(_) => None,
    }
  }
}
