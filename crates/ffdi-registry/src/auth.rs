use std::fmt;

use crate::error::AuthError;

/// Bearer credentials attached to every registry request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  token: String,
}

impl Credentials {
  pub fn bearer(token: impl Into<String>) -> Self {
    Self {
      token: token.into(),
    }
  }

  pub fn token(&self) -> &str {
    &self.token
  }
}

// Never print the token itself.
impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("token", &"<redacted>")
      .finish()
  }
}

/// Produces bearer credentials on demand.
///
/// Validation asks for credentials once per lookup and never keeps the
/// result, so providers are free to refresh tokens between calls.
pub trait AuthProvider: Send + Sync {
  fn credentials(&self) -> Result<Credentials, AuthError>;
}

impl<F> AuthProvider for F
where
  F: Fn() -> Result<Credentials, AuthError> + Send + Sync,
{
  fn credentials(&self) -> Result<Credentials, AuthError> {
    self()
  }
}

/// Hands out the same token on every call.
#[derive(Debug, Clone)]
pub struct StaticToken {
  credentials: Credentials,
}

impl StaticToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self {
      credentials: Credentials::bearer(token),
    }
  }
}

impl AuthProvider for StaticToken {
  fn credentials(&self) -> Result<Credentials, AuthError> {
    Ok(self.credentials.clone())
  }
}

/// Reads the token from an environment variable each time it is asked.
#[derive(Debug, Clone)]
pub struct EnvToken {
  var: String,
}

impl EnvToken {
  pub fn new(var: impl Into<String>) -> Self {
    Self { var: var.into() }
  }

  pub fn var(&self) -> &str {
    &self.var
  }
}

impl AuthProvider for EnvToken {
  fn credentials(&self) -> Result<Credentials, AuthError> {
    match std::env::var(&self.var) {
      Ok(token) if !token.trim().is_empty() => Ok(Credentials::bearer(token.trim())),
      Ok(_) => Err(AuthError::Missing(format!(
        "environment variable {} is empty",
        self.var
      ))),
      Err(e) => Err(AuthError::Missing(format!("{}: {}", self.var, e))),
    }
  }
}
