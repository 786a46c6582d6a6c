use anyhow::{anyhow, Result};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Rendered in place of dates that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%x, %X";

/// Locale and time zone used to render dates for display.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
  pub locale: Locale,
  pub time_zone: Tz,
}

impl DisplayConfig {
  /// Builds a config from a POSIX locale name (`en_US`, `es_ES`) and an IANA
  /// zone name (`UTC`, `America/Bogota`).
  pub fn new(locale: &str, time_zone: &str) -> Result<Self> {
    let parsed_locale = Locale::try_from(locale).map_err(|_| anyhow!("Unknown locale: {}", locale))?;
    let parsed_zone = time_zone
      .parse::<Tz>()
      .map_err(|_| anyhow!("Unknown time zone: {}", time_zone))?;

    Ok(DisplayConfig {
      locale: parsed_locale,
      time_zone: parsed_zone,
    })
  }

  pub fn with_locale(self, locale: &str) -> Result<Self> {
    let locale = Locale::try_from(locale).map_err(|_| anyhow!("Unknown locale: {}", locale))?;
    Ok(DisplayConfig { locale, ..self })
  }

  pub fn with_time_zone(self, time_zone: &str) -> Result<Self> {
    let time_zone = time_zone
      .parse::<Tz>()
      .map_err(|_| anyhow!("Unknown time zone: {}", time_zone))?;
    Ok(DisplayConfig { time_zone, ..self })
  }
}

impl Default for DisplayConfig {
  fn default() -> Self {
    DisplayConfig {
      locale: Locale::en_US,
      time_zone: Tz::UTC,
    }
  }
}

fn parse_date(input: &str, time_zone: Tz) -> Option<DateTime<Tz>> {
  let input = input.trim();

  if let Ok(date) = DateTime::parse_from_rfc3339(input) {
    return Some(date.with_timezone(&time_zone));
  }

  if let Ok(date) = DateTime::parse_from_rfc2822(input) {
    return Some(date.with_timezone(&time_zone));
  }

  // ISO forms RFC 3339 rejects: minutes-only times, basic `+hhmm` offsets.
  let with_offset = match input.strip_suffix('Z').or_else(|| input.strip_suffix('z')) {
    Some(rest) => format!("{}+00:00", rest),
    None => input.to_string(),
  };
  for fmt in ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"] {
    if let Ok(date) = DateTime::parse_from_str(&with_offset, fmt) {
      return Some(date.with_timezone(&time_zone));
    }
  }

  // Date-time without an offset is wall-clock time in the display zone.
  for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
      return time_zone.from_local_datetime(&naive).earliest();
    }
  }

  // Date-only is midnight UTC.
  NaiveDate::parse_from_str(input, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&time_zone))
}

/// Renders `date_string` in the configured locale and time zone.
///
/// Accepts RFC 3339, RFC 2822, ISO date-times with or without seconds,
/// with `Z`, `+hh:mm`, `+hhmm` or no offset, and bare ISO dates. Anything else renders as [`INVALID_DATE`].
pub fn format_date(date_string: &str, config: &DisplayConfig) -> String {
  match parse_date(date_string, config.time_zone) {
    Some(date) => date.format_localized(DISPLAY_FORMAT, config.locale).to_string(),
    None => {
      tracing::debug!(input = date_string, "Unparseable date");
      INVALID_DATE.to_string()
    }
  }
}

/// Converts CRLF line endings to LF and trims surrounding whitespace.
pub fn format_content(content: &str) -> String {
  content.replace("\r\n", "\n").trim().to_string()
}
