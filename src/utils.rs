pub mod formatters;

pub use formatters::{format_content, format_date, DisplayConfig};

use crate::{
  api::{ApiClient, ApiConfig},
  domains::email::service::EmailServiceImpl,
};

pub fn init_email_service(config: ApiConfig) -> anyhow::Result<EmailServiceImpl<ApiClient>> {
  let base_url = config.base_url.clone();
  let client = ApiClient::new(config)?;
  tracing::info!(%base_url, "Email service ready");
  Ok(EmailServiceImpl::new(client))
}

/// First `max_chars` characters of `content` on a single line, with an
/// ellipsis when anything was cut.
pub fn preview(content: &str, max_chars: usize) -> String {
  let flat = format_content(content).split_whitespace().collect::<Vec<_>>().join(" ");
  if flat.chars().count() <= max_chars {
    return flat;
  }
  let mut cut: String = flat.chars().take(max_chars).collect();
  cut.push('…');
  cut
}
