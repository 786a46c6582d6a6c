use async_trait::async_trait;
use serde_json::Value;

use super::{
  endpoints,
  model::{Email, SearchOptions},
};
use crate::{api::Api, error::ApiError};

/// Service operations, each tagged with the message logged when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  GetAll,
  Search,
  GetById,
  Create,
  Update,
  Delete,
}

impl Operation {
  pub fn as_str(&self) -> &'static str {
    match self {
      Operation::GetAll => "get_all",
      Operation::Search => "search",
      Operation::GetById => "get_by_id",
      Operation::Create => "create",
      Operation::Update => "update",
      Operation::Delete => "delete",
    }
  }

  pub fn failure_message(&self) -> &'static str {
    match self {
      Operation::GetAll => "Error fetching emails",
      Operation::Search => "Error searching emails",
      Operation::GetById => "Error fetching email",
      Operation::Create => "Error creating email",
      Operation::Update => "Error updating email",
      Operation::Delete => "Error deleting email",
    }
  }
}

fn log_failure(operation: Operation) -> impl FnOnce(ApiError) -> ApiError {
  move |error| {
    tracing::error!(operation = operation.as_str(), error = %error, "{}", operation.failure_message());
    error
  }
}

#[async_trait]
pub trait EmailService: Send + Sync {
  async fn get_all(&self) -> Result<Vec<Email>, ApiError>;
  async fn list_page(&self, page: u32, size: u32) -> Result<Vec<Email>, ApiError>;
  async fn search(&self, query: &str) -> Result<Vec<Email>, ApiError>;
  async fn search_with_options(&self, options: &SearchOptions) -> Result<Vec<Email>, ApiError>;
  async fn get_by_id(&self, id: &str) -> Result<Value, ApiError>;
  async fn create(&self, email_data: &Value) -> Result<Value, ApiError>;
  async fn update(&self, id: &str, email_data: &Value) -> Result<Value, ApiError>;
  async fn delete(&self, id: &str) -> Result<Value, ApiError>;
}

pub struct EmailServiceImpl<A> {
  api: A,
}

impl<A> EmailServiceImpl<A>
where
  A: Api,
{
  pub fn new(api: A) -> Self {
    Self { api }
  }

  pub fn api(&self) -> &A {
    &self.api
  }

  async fn fetch_hits(&self, path: &str, operation: Operation) -> Result<Vec<Email>, ApiError> {
    self
      .api
      .get(path)
      .await
      .and_then(|response| endpoints::extract_hits(response.data))
      .map_err(log_failure(operation))
  }
}

#[async_trait]
impl<A> EmailService for EmailServiceImpl<A>
where
  A: Api,
{
  async fn get_all(&self) -> Result<Vec<Email>, ApiError> {
    self.fetch_hits(endpoints::EMAILS, Operation::GetAll).await
  }

  async fn list_page(&self, page: u32, size: u32) -> Result<Vec<Email>, ApiError> {
    self.fetch_hits(&endpoints::list_page(page, size), Operation::GetAll).await
  }

  async fn search(&self, query: &str) -> Result<Vec<Email>, ApiError> {
    self.fetch_hits(&endpoints::search(query), Operation::Search).await
  }

  async fn search_with_options(&self, options: &SearchOptions) -> Result<Vec<Email>, ApiError> {
    self
      .fetch_hits(&endpoints::search_with_options(options), Operation::Search)
      .await
  }

  async fn get_by_id(&self, id: &str) -> Result<Value, ApiError> {
    self
      .api
      .get(&endpoints::email(id))
      .await
      .map(|response| response.data)
      .map_err(log_failure(Operation::GetById))
  }

  async fn create(&self, email_data: &Value) -> Result<Value, ApiError> {
    self
      .api
      .post(endpoints::EMAILS, email_data)
      .await
      .map(|response| response.data)
      .map_err(log_failure(Operation::Create))
  }

  async fn update(&self, id: &str, email_data: &Value) -> Result<Value, ApiError> {
    self
      .api
      .put(&endpoints::email(id), email_data)
      .await
      .map(|response| response.data)
      .map_err(log_failure(Operation::Update))
  }

  async fn delete(&self, id: &str) -> Result<Value, ApiError> {
    self
      .api
      .delete(&endpoints::email(id))
      .await
      .map(|response| response.data)
      .map_err(log_failure(Operation::Delete))
  }
}
