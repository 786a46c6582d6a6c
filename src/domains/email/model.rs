use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// An email record exactly as the API returns it. The service never looks
/// inside it.
pub type Email = Value;

/// Typed view of an indexed email document, for callers that want fields
/// instead of raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailDocument {
  pub path: String,
  pub content: String,
  pub sender: String,
  pub recipient: String,
  pub subject: String,
  pub date: Option<DateTime<Utc>>,
  pub folder: String,
}

/// One entry of a `hits.hits` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Hit {
  #[serde(rename = "_id", default)]
  pub id: String,
  #[serde(rename = "_score", default)]
  pub score: Option<f64>,
  #[serde(rename = "_source", default)]
  pub source: EmailDocument,
}

impl Hit {
  pub fn from_value(value: &Email) -> Result<Self, ApiError> {
    Ok(Hit::deserialize(value)?)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
  Asc,
  Desc,
}

impl SortOrder {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortOrder::Asc => "asc",
      SortOrder::Desc => "desc",
    }
  }
}

impl FromStr for SortOrder {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "asc" => Ok(SortOrder::Asc),
      "desc" => Ok(SortOrder::Desc),
      other => Err(format!("unknown sort order '{}', expected asc or desc", other)),
    }
  }
}

/// Query parameters understood by the `/search` endpoint beyond `q`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
  pub query: String,
  pub fields: Vec<String>,
  pub from: Option<u32>,
  pub size: Option<u32>,
  pub sort_field: Option<String>,
  pub sort_order: Option<SortOrder>,
}

impl SearchOptions {
  pub fn new(query: impl Into<String>) -> Self {
    SearchOptions {
      query: query.into(),
      ..SearchOptions::default()
    }
  }

  pub fn with_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.fields = fields.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_page(mut self, from: u32, size: u32) -> Self {
    self.from = Some(from);
    self.size = Some(size);
    self
  }

  pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
    self.sort_field = Some(field.into());
    self.sort_order = Some(order);
    self
  }
}
