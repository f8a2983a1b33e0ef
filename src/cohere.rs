//! Minimal Cohere client for the `/generate` endpoint.
//!
//! Calls are instrumented and log model names, latencies and response sizes (not contents).
//! The API key is never logged.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domain::GenerationRequest;
use crate::error::GenerationError;
use crate::llm::{http_client, TextGenerator};

#[derive(Clone)]
pub struct Cohere {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Cohere {
  /// `Ok(None)` when COHERE_API_KEY is absent.
  pub fn from_env() -> Result<Option<Self>, String> {
    let api_key = match std::env::var("COHERE_API_KEY") {
      Ok(k) if !k.trim().is_empty() => k,
      _ => return Ok(None),
    };
    let base_url = std::env::var("COHERE_BASE_URL").unwrap_or_else(|_| "https://api.cohere.ai/v1".into());
    let model = std::env::var("COHERE_MODEL").unwrap_or_else(|_| "command".into());
    Ok(Some(Self { client: http_client()?, api_key, base_url, model }))
  }

  fn build_body<'a>(&'a self, request: &'a GenerationRequest) -> GenerateRequest<'a> {
    GenerateRequest {
      model: request.model.as_deref().unwrap_or(&self.model),
      prompt: &request.prompt,
      max_tokens: request.max_tokens,
      temperature: request.temperature,
    }
  }
}

#[async_trait]
impl TextGenerator for Cohere {
  fn provider(&self) -> &'static str { "cohere" }

  fn default_model(&self) -> &str { &self.model }

  #[instrument(level = "info", skip(self, request), fields(prompt_len = request.prompt.len(), max_tokens = request.max_tokens))]
  async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, GenerationError> {
    let url = format!("{}/generate", self.base_url.trim_end_matches('/'));
    let body = self.build_body(request);
    let model = request.model.as_deref().unwrap_or(&self.model);
    let start = Instant::now();

    let res = self.client.post(&url)
      .header(USER_AGENT, "interview-bot/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&body).send().await?;

    if !res.status().is_success() {
      let status = res.status();
      let text = res.text().await.unwrap_or_default();
      let message = extract_cohere_error(&text).unwrap_or(text);
      error!(%model, elapsed = ?start.elapsed(), %status, "Cohere call failed");
      return Err(GenerationError::Http { status: status.as_u16(), message });
    }

    let body: GenerateResponse = res.json().await?;
    if let Some(units) = body.meta.as_ref().and_then(|m| m.billed_units.as_ref()) {
      info!(input_tokens = ?units.input_tokens, output_tokens = ?units.output_tokens, "Cohere usage");
    }
    let candidates = candidates_from(body);
    info!(%model, elapsed = ?start.elapsed(), candidates = candidates.len(), first_len = candidates.first().map(|c| c.len()).unwrap_or(0), "Cohere response received");
    Ok(candidates)
  }
}

fn candidates_from(body: GenerateResponse) -> Vec<String> {
  body.generations.into_iter().map(|g| g.text).collect()
}

// --- DTOs ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
  model: &'a str,
  prompt: &'a str,
  max_tokens: u32,
  temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  generations: Vec<Generation>,
  #[serde(default)]
  meta: Option<Meta>,
}
#[derive(Deserialize)]
struct Generation { text: String }
#[derive(Deserialize)]
struct Meta { #[serde(default)] billed_units: Option<BilledUnits> }
#[derive(Deserialize)]
struct BilledUnits {
  #[serde(default)] input_tokens: Option<f64>,
  #[serde(default)] output_tokens: Option<f64>,
}

/// Cohere errors look like `{"message": "..."}`.
fn extract_cohere_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EObj>(body).ok().map(|e| e.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client() -> Cohere {
    Cohere {
      client: reqwest::Client::new(),
      api_key: "secret".into(),
      base_url: "https://example.invalid/v1".into(),
      model: "command".into(),
    }
  }

  #[test]
  fn body_uses_configured_model_unless_overridden() {
    let c = client();
    let mut req = GenerationRequest { prompt: "p".into(), max_tokens: 100, temperature: 0.7, model: None };
    let json = serde_json::to_value(c.build_body(&req)).unwrap();
    assert_eq!(json["model"], "command");
    assert_eq!(json["max_tokens"], 100);
    assert_eq!(json["prompt"], "p");

    req.model = Some("command-r".into());
    let json = serde_json::to_value(c.build_body(&req)).unwrap();
    assert_eq!(json["model"], "command-r");
  }

  #[test]
  fn parses_generations_in_order() {
    let raw = r#"{
      "id": "abc",
      "generations": [{"id": "g1", "text": " first "}, {"id": "g2", "text": "second"}],
      "prompt": "p",
      "meta": {"api_version": {"version": "1"}, "billed_units": {"input_tokens": 12, "output_tokens": 40}}
    }"#;
    let body: GenerateResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(candidates_from(body), vec![" first ".to_string(), "second".to_string()]);
  }

  #[test]
  fn missing_generations_is_empty_not_an_error() {
    let body: GenerateResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
    assert!(candidates_from(body).is_empty());
  }

  #[test]
  fn extracts_error_message() {
    assert_eq!(extract_cohere_error(r#"{"message":"invalid api token"}"#).as_deref(), Some("invalid api token"));
    assert_eq!(extract_cohere_error("<html>bad gateway</html>"), None);
  }
}
