use std::error::Error;

/// Failure of a call against the email search API.
///
/// Errors produced by the HTTP collaborator travel up to the caller as the same
/// value; the service layer only adds [`ApiError::MissingHits`] when a search
/// envelope cannot be unwrapped.
#[derive(Debug)]
pub enum ApiError {
  Transport(reqwest::Error),
  Status { status: u16, body: String },
  Decode(serde_json::Error),
  MissingHits,
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
      _ => None,
    }
  }
}

impl Error for ApiError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      ApiError::Transport(err) => Some(err),
      ApiError::Decode(err) => Some(err),
      ApiError::Status { .. } | ApiError::MissingHits => None,
    }
  }
}

impl std::fmt::Display for ApiError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ApiError::Transport(err) => write!(f, "Transport Error: {}", err),
      ApiError::Status { status, body } if body.is_empty() => write!(f, "HTTP Error: status {}", status),
      ApiError::Status { status, body } => write!(f, "HTTP Error: status {}: {}", status, body),
      ApiError::Decode(err) => write!(f, "Decode Error: {}", err),
      ApiError::MissingHits => write!(f, "Malformed Response: no hits.hits array in search envelope"),
    }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(err: reqwest::Error) -> Self {
    ApiError::Transport(err)
  }
}

impl From<serde_json::Error> for ApiError {
  fn from(err: serde_json::Error) -> Self {
    ApiError::Decode(err)
  }
}
