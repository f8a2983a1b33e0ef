//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::State, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic::{generate_question, submit_answer};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(difficulty = %body.difficulty, topic = %body.topic))]
pub async fn http_generate_question(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuestionIn>,
) -> Result<Json<QuestionOut>, ApiError> {
  let question = generate_question(&state, &body.difficulty, &body.topic).await?;
  info!(target: "question", difficulty = %body.difficulty, topic = %body.topic, "HTTP question served");
  Ok(Json(QuestionOut { question }))
}

#[instrument(level = "info", skip(state, body), fields(answer_len = body.answer.len()))]
pub async fn http_evaluate_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<FeedbackOut>, ApiError> {
  let result = submit_answer(&state, &body.answer).await?;
  info!(target: "evaluation", score = result.score, "HTTP answer evaluated");
  Ok(Json(result.into()))
}
