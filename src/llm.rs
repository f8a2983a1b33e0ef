//! The one outbound capability: prompt + parameters in, candidate texts out.
//!
//! Providers implement `TextGenerator`; the rest of the crate only sees
//! `Arc<dyn TextGenerator>`, which is built once at startup by `generator_from_env`.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::info;

use crate::cohere::Cohere;
use crate::domain::GenerationRequest;
use crate::error::GenerationError;
use crate::openai::OpenAI;

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[async_trait]
pub trait TextGenerator: Send + Sync {
  /// Short provider label for logs.
  fn provider(&self) -> &'static str;

  /// Model used when a request does not override it.
  fn default_model(&self) -> &str;

  /// Returns at least one candidate or an error. Callers use only the first.
  async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, GenerationError>;
}

/// First candidate, trimmed. Missing or blank candidates are unusable.
pub fn first_candidate(candidates: Vec<String>) -> Result<String, GenerationError> {
  let text = candidates
    .into_iter()
    .next()
    .map(|c| c.trim().to_string())
    .unwrap_or_default();
  if text.is_empty() {
    Err(GenerationError::Empty)
  } else {
    Ok(text)
  }
}

/// Shared HTTP client for providers (timeout applies to the whole request).
pub fn http_client() -> Result<reqwest::Client, String> {
  let secs = std::env::var("LLM_TIMEOUT_SECS")
    .ok()
    .and_then(|s| s.parse::<u64>().ok())
    .unwrap_or(DEFAULT_TIMEOUT_SECS);
  reqwest::Client::builder()
    .timeout(Duration::from_secs(secs))
    .build()
    .map_err(|e| format!("Failed to build HTTP client: {e}"))
}

/// Pick the provider from LLM_PROVIDER ("cohere" by default, or "openai").
/// A missing credential is a startup error; there is no offline fallback.
pub fn generator_from_env() -> Result<Arc<dyn TextGenerator>, String> {
  let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "cohere".into());
  let generator: Arc<dyn TextGenerator> = match provider.to_ascii_lowercase().as_str() {
    "cohere" => Arc::new(Cohere::from_env()?.ok_or("COHERE_API_KEY is not set")?),
    "openai" => Arc::new(OpenAI::from_env()?.ok_or("OPENAI_API_KEY is not set")?),
    other => return Err(format!("Unknown LLM_PROVIDER '{other}' (expected 'cohere' or 'openai')")),
  };
  info!(target: "interview_bot", provider = generator.provider(), model = generator.default_model(), "Text generation client ready");
  Ok(generator)
}
