use std::env;

use anyhow::{Context, Result};

use crate::{
  api::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
  utils::formatters::{DisplayConfig, DEFAULT_LOCALE, DEFAULT_TIME_ZONE},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api: ApiConfig,
  pub display: DisplayConfig,
}

impl AppConfig {
  /// Reads `EMAIL_API_BASE_URL`, `EMAIL_API_TIMEOUT_SECS`, `DISPLAY_LOCALE`
  /// and `DISPLAY_TIME_ZONE`, falling back to defaults for unset variables.
  pub fn from_env() -> Result<Self> {
    let base_url = env::var("EMAIL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let timeout_secs = match env::var("EMAIL_API_TIMEOUT_SECS") {
      Ok(value) => value
        .parse()
        .with_context(|| format!("EMAIL_API_TIMEOUT_SECS must be a whole number of seconds, got '{}'", value))?,
      Err(_) => DEFAULT_TIMEOUT_SECS,
    };
    let locale = env::var("DISPLAY_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
    let time_zone = env::var("DISPLAY_TIME_ZONE").unwrap_or_else(|_| DEFAULT_TIME_ZONE.to_string());

    let mut config = AppConfig {
      api: ApiConfig {
        timeout_secs,
        ..ApiConfig::default()
      },
      display: DisplayConfig::default(),
    };
    config.set_base_url(&base_url)?;
    config.set_display(&locale, &time_zone)?;

    Ok(config)
  }

  pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
    reqwest::Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
    self.api.base_url = base_url.to_string();
    Ok(())
  }

  pub fn set_display(&mut self, locale: &str, time_zone: &str) -> Result<()> {
    self.display = DisplayConfig::new(locale, time_zone).context("Invalid display settings")?;
    Ok(())
  }

  /// Applies command-line overrides on top of the loaded display settings.
  /// A `None` keeps the current value.
  pub fn override_display(&mut self, locale: Option<&str>, time_zone: Option<&str>) -> Result<()> {
    let mut display = self.display;
    if let Some(locale) = locale {
      display = display.with_locale(locale).context("Invalid display settings")?;
    }
    if let Some(time_zone) = time_zone {
      display = display.with_time_zone(time_zone).context("Invalid display settings")?;
    }
    self.display = display;
    Ok(())
  }
}
