pub mod api;
pub mod config;
pub mod domains;
pub mod error;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use api::{Api, ApiClient, ApiConfig, ApiResponse};
pub use config::AppConfig;
pub use domains::email::{
  model::{Email, EmailDocument, Hit, SearchOptions, SortOrder},
  service::{EmailService, EmailServiceImpl},
};
pub use error::ApiError;
pub use utils::formatters::{format_content, format_date, DisplayConfig};
