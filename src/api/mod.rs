//! REST client for the trainer API
//!
//! One `ApiClient` per logged-in session. Resource families live in the
//! submodules as additional `impl ApiClient` blocks.

pub mod admin;
pub mod assessments;
pub mod auth;
pub mod chat;
pub mod checkins;
pub mod financial;
pub mod gamification;
pub mod library;
pub mod notifications;
pub mod photos;
pub mod progress;
pub mod routines;
pub mod sessions;
pub mod stats;
pub mod students;
pub mod workouts;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Query string pairs; `None` values are skipped
pub type Query<'a> = [(&'a str, Option<&'a str>)];

/// Generic `{"message": "..."}` acknowledgement returned by mutations
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ack {
  #[serde(default)]
  pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  #[serde(default)]
  detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
  http: Client,
  base_url: String,
  token: Option<String>,
}

impl ApiClient {
  pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
    let http = Client::builder().timeout(config.http_timeout).build()?;
    Ok(Self {
      http,
      base_url: config.api_url.clone(),
      token: None,
    })
  }

  /// Same connection pool, authenticated with `token`
  pub fn with_token(&self, token: impl Into<String>) -> Self {
    Self {
      http: self.http.clone(),
      base_url: self.base_url.clone(),
      token: Some(token.into()),
    }
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.token.is_some()
  }

  /// ---------------------------------------------------------------------------
  /// Request plumbing
  /// ---------------------------------------------------------------------------

  pub(crate) fn url(&self, path: &str, query: &Query<'_>) -> Result<Url, ApiError> {
    let mut url = Url::parse(&format!("{}{}", self.base_url, path))
      .map_err(|e| ApiError::Parse(format!("Invalid URL for {}: {}", path, e)))?;

    let present: Vec<(&str, &str)> = query
      .iter()
      .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (*k, v)))
      .collect();

    if !present.is_empty() {
      url.query_pairs_mut().extend_pairs(present);
    }

    Ok(url)
  }

  pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
    let builder = self.http.request(method, url);
    match &self.token {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    }
  }

  /// Send and turn non-2xx responses into `ApiError`
  pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder.send().await?;
    let status = response.status();

    if status.is_success() {
      return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);

    tracing::warn!(status = status.as_u16(), path = %url, detail = %detail, "API request failed");

    if status == StatusCode::UNAUTHORIZED && self.token.is_some() {
      return Err(ApiError::NotAuthenticated);
    }

    Err(ApiError::Api {
      status: status.as_u16(),
      detail,
    })
  }

  pub(crate) async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &Query<'_>,
  ) -> Result<T, ApiError> {
    let url = self.url(path, query)?;
    tracing::debug!(%url, "GET");
    let response = self.send(self.request(Method::GET, url)).await?;
    decode(response, path).await
  }

  pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    &self,
    path: &str,
    query: &Query<'_>,
    body: &B,
  ) -> Result<T, ApiError> {
    let url = self.url(path, query)?;
    tracing::debug!(%url, "POST");
    let response = self.send(self.request(Method::POST, url).json(body)).await?;
    decode(response, path).await
  }

  pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T, ApiError> {
    let url = self.url(path, &[])?;
    tracing::debug!(%url, "PUT");
    let response = self.send(self.request(Method::PUT, url).json(body)).await?;
    decode(response, path).await
  }

  pub(crate) async fn delete(&self, path: &str) -> Result<Ack, ApiError> {
    let url = self.url(path, &[])?;
    tracing::debug!(%url, "DELETE");
    let response = self.send(self.request(Method::DELETE, url)).await?;
    decode(response, path).await
  }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
  let text = response.text().await?;
  serde_json::from_str(&text).map_err(|e| {
    let preview: String = text.chars().take(500).collect();
    tracing::error!(
      path,
      error = %e,
      body = %preview,
      "Failed to parse API response"
    );
    ApiError::Parse(format!("Failed to parse {}: {}", path, e))
  })
}

/// Pull the human-readable `detail` out of an error body.
/// Validation errors carry a list instead of a string; those are rendered as JSON.
fn extract_detail(body: &str) -> String {
  match serde_json::from_str::<ErrorBody>(body) {
    Ok(ErrorBody {
      detail: Some(serde_json::Value::String(s)),
    }) => s,
    Ok(ErrorBody { detail: Some(other) }) => other.to_string(),
    _ => String::new(),
  }
}

/// Path segment with reserved characters escaped
pub(crate) fn segment(id: &str) -> String {
  url::form_urlencoded::byte_serialize(id.as_bytes())
    .collect::<String>()
    .replace('+', "%20")
}
