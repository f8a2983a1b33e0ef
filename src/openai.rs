//! Minimal OpenAI-compatible client (chat.completions, plain text).
//!
//! The prompt is sent as a single user message. Calls are instrumented and log model
//! names, latencies, and token usage (not contents).
//!
//! NOTE: We never log the API key.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domain::GenerationRequest;
use crate::error::GenerationError;
use crate::llm::{http_client, TextGenerator};

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// `Ok(None)` when OPENAI_API_KEY is absent.
  pub fn from_env() -> Result<Option<Self>, String> {
    let api_key = match std::env::var("OPENAI_API_KEY") {
      Ok(k) if !k.trim().is_empty() => k,
      _ => return Ok(None),
    };
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model =
      std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    Ok(Some(Self { client: http_client()?, api_key, base_url, model }))
  }

  fn build_body(&self, request: &GenerationRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
      model: request.model.clone().unwrap_or_else(|| self.model.clone()),
      messages: vec![ChatMessageReq { role: "user".into(), content: request.prompt.clone() }],
      temperature: request.temperature,
      max_tokens: Some(request.max_tokens),
    }
  }
}

#[async_trait]
impl TextGenerator for OpenAI {
  fn provider(&self) -> &'static str { "openai" }

  fn default_model(&self) -> &str { &self.model }

  #[instrument(level = "info", skip(self, request), fields(prompt_len = request.prompt.len(), max_tokens = request.max_tokens))]
  async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, GenerationError> {
    let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
    let req = self.build_body(request);
    let model = request.model.as_deref().unwrap_or(&self.model);
    let start = Instant::now();

    let res = self.client.post(&url)
      .header(USER_AGENT, "interview-bot/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      error!(%model, elapsed = ?start.elapsed(), %status, "OpenAI call failed");
      return Err(GenerationError::Http { status: status.as_u16(), message });
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let candidates = candidates_from(body);
    info!(%model, elapsed = ?start.elapsed(), candidates = candidates.len(), "OpenAI response received");
    Ok(candidates)
  }
}

/// One candidate per choice, in order. A choice without text content becomes an
/// empty candidate so it still occupies its position.
fn candidates_from(body: ChatCompletionResponse) -> Vec<String> {
  body.choices.into_iter().map(|c| c.message.content.unwrap_or_default()).collect()
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)] choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
