//! Score extraction from free-text grading feedback.
//!
//! The evaluation prompt asks the model to finish with `Score: X/10`. Models do not
//! always comply, so the search is tolerant about case, spacing and a `:`/`-`
//! separator, and only the leftmost match counts (echoed instructions come first
//! in that case, and that is accepted).
//!
//! When nothing matches, `extract_score` returns 0. A missing score and an explicit
//! zero are indistinguishable to callers.

use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_SCORE: u8 = 10;

lazy_static! {
  static ref SCORE_RE: Regex =
    Regex::new(r"(?i)Score\s*[:\-]?\s*([0-9]{1,2})/10").expect("score regex is valid");
}

/// First `Score: N/10` in `feedback`, clamped to `0..=10`. `None` when absent.
/// `N` is one or two ASCII digits; other Unicode digits are not recognized.
pub fn match_score(feedback: &str) -> Option<u8> {
  let caps = SCORE_RE.captures(feedback)?;
  // One or two ASCII digits always fit in a u8.
  let raw: u8 = caps.get(1)?.as_str().parse().ok()?;
  Some(raw.min(MAX_SCORE))
}

/// Score for `feedback`, defaulting to 0 when no score line is present.
pub fn extract_score(feedback: &str) -> u8 {
  match_score(feedback).unwrap_or(0)
}
