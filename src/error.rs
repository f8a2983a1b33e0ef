//! Error types: client-level (`GenerationError`) and boundary-level (`ApiError`).

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use thiserror::Error;

pub const ANSWER_TOO_SHORT: &str = "Answer too short or unclear.";
pub const INTERNAL_ERROR: &str = "Internal error while contacting the language model.";

/// Anything that can go wrong talking to the text-generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
  #[error("transport error: {0}")]
  Transport(String),
  #[error("provider HTTP {status}: {message}")]
  Http { status: u16, message: String },
  #[error("malformed provider response: {0}")]
  Malformed(String),
  #[error("provider returned no usable candidate")]
  Empty,
}

impl From<reqwest::Error> for GenerationError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() {
      GenerationError::Malformed(e.to_string())
    } else {
      GenerationError::Transport(e.to_string())
    }
  }
}

/// Errors surfaced to callers. The generation cause is kept for logs only.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Validation(String),
  #[error("generation failed: {0}")]
  Generation(#[from] GenerationError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Caller-facing message. Generation failures are deliberately generic.
  pub fn public_message(&self) -> String {
    match self {
      ApiError::Validation(msg) => msg.clone(),
      ApiError::Generation(_) => INTERNAL_ERROR.to_string(),
    }
  }
}

#[derive(Serialize)]
struct ErrorBody {
  detail: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorBody { detail: self.public_message() })).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_maps_to_400_with_message() {
    let e = ApiError::Validation(ANSWER_TOO_SHORT.into());
    assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    assert_eq!(e.public_message(), ANSWER_TOO_SHORT);
  }

  #[test]
  fn generation_hides_cause() {
    let e = ApiError::from(GenerationError::Http { status: 429, message: "quota exceeded for key abc".into() });
    assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(e.public_message(), INTERNAL_ERROR);
    assert!(e.to_string().contains("429"));
  }
}
