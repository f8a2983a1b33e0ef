//! Domain values passed between the boundary, the components and the model client.
//! Nothing here outlives a single request.

use serde::Serialize;

/// One call to the text-generation service.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
  pub prompt: String,
  /// Upper bound on generated tokens (a hint to the provider, not checked locally).
  pub max_tokens: u32,
  pub temperature: f32,
  /// Overrides the client's configured model when set.
  pub model: Option<String>,
}

/// Graded answer. `score` is always derived from `feedback`, never set independently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackResult {
  pub feedback: String,
  pub score: u8,
}

impl FeedbackResult {
  pub fn from_feedback(feedback: String) -> Self {
    let score = crate::score::extract_score(&feedback);
    Self { feedback, score }
  }
}
