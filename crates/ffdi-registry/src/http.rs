use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::auth::Credentials;
use crate::entity::{EntityKind, RegisteredEntity};
use crate::error::RegistryError;
use crate::registry::Registry;

/// Status block the registry attaches to every fetch response.
#[derive(Debug, Deserialize)]
struct ResponseStatus {
  success: bool,
  #[serde(default)]
  details: String,
}

/// Expected body of a fetch response.
#[derive(Debug, Deserialize)]
struct FetchResponse {
  status: ResponseStatus,
  #[serde(default)]
  item: Option<serde_json::Value>,
}

/// Registry client that talks to the registry REST API.
///
/// Each lookup is a `GET {endpoint}/{route}?id={id}` carrying the bearer
/// token in the `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct HttpRegistry {
  client: Client,
}

impl HttpRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Use an existing client (shared connection pool, custom timeouts).
  pub fn with_client(client: Client) -> Self {
    Self { client }
  }

  fn fetch_url(endpoint: &str, kind: EntityKind, id: &str) -> Result<Url, RegistryError> {
    let base = format!("{}/{}", endpoint.trim_end_matches('/'), kind.fetch_route());
    let mut url = Url::parse(&base).map_err(|e| RegistryError::InvalidEndpoint {
      endpoint: endpoint.to_string(),
      message: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("id", id);
    Ok(url)
  }
}

#[async_trait]
impl Registry for HttpRegistry {
  async fn fetch(
    &self,
    kind: EntityKind,
    endpoint: &str,
    id: &str,
    credentials: &Credentials,
  ) -> Result<RegisteredEntity, RegistryError> {
    let url = Self::fetch_url(endpoint, kind, id)?;
    debug!(kind = %kind, id = %id, url = %url, "fetching registry entity");

    let response = self
      .client
      .get(url)
      .bearer_auth(credentials.token())
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(RegistryError::Status {
        kind,
        id: id.to_string(),
        status: status.as_u16(),
      });
    }

    let body = response.text().await?;
    let parsed: FetchResponse = serde_json::from_str(&body)?;

    if !parsed.status.success {
      return Err(RegistryError::Rejected {
        kind,
        id: id.to_string(),
        details: parsed.status.details,
      });
    }

    match parsed.item {
      Some(item) => Ok(RegisteredEntity {
        kind,
        id: id.to_string(),
        item,
      }),
      None => Err(RegistryError::Rejected {
        kind,
        id: id.to_string(),
        details: "response did not include an item".to_string(),
      }),
    }
  }
}
