use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::api::types::{ApiConfig, ApiResponse};
use crate::error::ApiError;

#[async_trait]
pub trait Api: Send + Sync {
  async fn get(&self, path: &str) -> Result<ApiResponse, ApiError>;
  async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError>;
  async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError>;
  async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
  config: ApiConfig,
  http: Client,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(config.user_agent.clone())
      .build()?;

    Ok(ApiClient { config, http })
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  /// Joins `path` onto the base URL. Paths arrive already percent-encoded and
  /// are not touched again.
  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse, ApiError> {
    let url = self.url(path);
    tracing::debug!(%method, %url, "Sending API request");

    let mut request = self.http.request(method.clone(), &url);
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
      tracing::warn!(%method, %url, status = status.as_u16(), "API request failed");
      return Err(ApiError::Status {
        status: status.as_u16(),
        body: String::from_utf8_lossy(&bytes).into_owned(),
      });
    }

    let data = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes)?
    };

    Ok(ApiResponse::new(status.as_u16(), data))
  }
}

#[async_trait]
impl Api for ApiClient {
  async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
    self.send(Method::GET, path, None).await
  }

  async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError> {
    self.send(Method::POST, path, Some(body)).await
  }

  async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError> {
    self.send(Method::PUT, path, Some(body)).await
  }

  async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
    self.send(Method::DELETE, path, None).await
  }
}
