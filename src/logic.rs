//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Question generation (difficulty + topic → trimmed question text)
//!   - Answer validation at the boundary (minimum trimmed length)
//!   - Answer evaluation (feedback text + extracted score)
//!
//! Each operation makes exactly one model call and never retries.

use std::time::Instant;

use tracing::{error, info, instrument};

use crate::config::GenerationParams;
use crate::domain::{FeedbackResult, GenerationRequest};
use crate::error::{ApiError, ANSWER_TOO_SHORT};
use crate::llm::first_candidate;
use crate::state::AppState;
use crate::util::{fill_template, trunc_for_log};

/// Answers shorter than this (in chars, after trimming) never reach the model.
pub const MIN_ANSWER_CHARS: usize = 10;

fn request_for(prompt: String, params: &GenerationParams) -> GenerationRequest {
  GenerationRequest {
    prompt,
    max_tokens: params.max_tokens,
    temperature: params.temperature,
    model: params.model.clone(),
  }
}

pub fn question_prompt(state: &AppState, difficulty: &str, topic: &str) -> String {
  let difficulty = difficulty.to_lowercase();
  fill_template(&state.prompts.question_template, &[("difficulty", difficulty.as_str()), ("topic", topic)])
}

pub fn evaluation_prompt(state: &AppState, answer: &str) -> String {
  fill_template(&state.prompts.evaluation_template, &[("answer", answer)])
}

#[instrument(level = "info", skip(state))]
pub async fn generate_question(state: &AppState, difficulty: &str, topic: &str) -> Result<String, ApiError> {
  let req = request_for(question_prompt(state, difficulty, topic), &state.question);
  let start = Instant::now();
  let question = match state.generator.generate(&req).await.and_then(first_candidate) {
    Ok(q) => q,
    Err(e) => {
      error!(target: "question", elapsed = ?start.elapsed(), error = %e, "Question generation failed");
      return Err(e.into());
    }
  };
  info!(target: "question", elapsed = ?start.elapsed(), question_len = question.len(), preview = %trunc_for_log(&question, 60), "Question generated");
  Ok(question)
}

/// Boundary precondition for evaluation.
pub fn validate_answer(answer: &str) -> Result<(), ApiError> {
  if answer.trim().chars().count() < MIN_ANSWER_CHARS {
    return Err(ApiError::Validation(ANSWER_TOO_SHORT.into()));
  }
  Ok(())
}

/// Grade an answer that already passed `validate_answer`.
#[instrument(level = "info", skip(state, answer), fields(answer_len = answer.len()))]
pub async fn evaluate_answer(state: &AppState, answer: &str) -> Result<FeedbackResult, ApiError> {
  let req = request_for(evaluation_prompt(state, answer), &state.evaluation);
  let start = Instant::now();
  let feedback = match state.generator.generate(&req).await.and_then(first_candidate) {
    Ok(f) => f,
    Err(e) => {
      error!(target: "evaluation", elapsed = ?start.elapsed(), error = %e, "Answer evaluation failed");
      return Err(e.into());
    }
  };
  let result = FeedbackResult::from_feedback(feedback);
  info!(target: "evaluation", elapsed = ?start.elapsed(), score = result.score, feedback_len = result.feedback.len(), "Answer evaluated");
  Ok(result)
}

/// Validation then evaluation; what both transports call.
pub async fn submit_answer(state: &AppState, answer: &str) -> Result<FeedbackResult, ApiError> {
  validate_answer(answer)?;
  evaluate_answer(state, answer).await
}
