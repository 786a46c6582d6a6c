use serde_json::Value;

use super::model::{Email, SearchOptions};
use crate::error::ApiError;

pub const EMAILS: &str = "/emails";

pub fn email(id: &str) -> String {
  format!("{}/{}", EMAILS, urlencoding::encode(id))
}

pub fn search(query: &str) -> String {
  format!("/search?q={}", urlencoding::encode(query))
}

pub fn search_with_options(options: &SearchOptions) -> String {
  let mut params = vec![format!("q={}", urlencoding::encode(&options.query))];

  if let Some(from) = options.from {
    params.push(format!("from={}", from));
  }
  if let Some(size) = options.size {
    params.push(format!("size={}", size));
  }
  if let Some(field) = &options.sort_field {
    params.push(format!("sort={}", urlencoding::encode(field)));
  }
  if let Some(order) = options.sort_order {
    params.push(format!("order={}", order.as_str()));
  }
  for field in &options.fields {
    params.push(format!("fields={}", urlencoding::encode(field)));
  }

  format!("/search?{}", params.join("&"))
}

pub fn list_page(page: u32, size: u32) -> String {
  format!("{}?page={}&size={}", EMAILS, page, size)
}

/// Takes the `hits.hits` array out of a search envelope.
pub fn extract_hits(mut data: Value) -> Result<Vec<Email>, ApiError> {
  match data.pointer_mut("/hits/hits").map(Value::take) {
    Some(Value::Array(hits)) => Ok(hits),
    _ => Err(ApiError::MissingHits),
  }
}
