//! Public protocol structs for HTTP and WebSocket endpoints (serde ready).
//! Field names match what the existing frontend sends and reads.

use serde::{Deserialize, Serialize};

use crate::domain::FeedbackResult;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    GenerateQuestion { difficulty: String, topic: String },
    EvaluateAnswer { answer: String },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question { question: String },
    Feedback { feedback: String, score: u8 },
    Error { message: String },
}

// ---- HTTP DTOs ----

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuestionIn {
    pub difficulty: String,
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionOut {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackOut {
    pub feedback: String,
    pub score: u8,
}

impl From<FeedbackResult> for FeedbackOut {
    fn from(r: FeedbackResult) -> Self {
        Self { feedback: r.feedback, score: r.score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_messages_are_tagged_snake_case() {
        let msg: ClientWsMessage =
            serde_json::from_str(r#"{"type":"generate_question","difficulty":"Easy","topic":"arrays"}"#).unwrap();
        assert!(matches!(msg, ClientWsMessage::GenerateQuestion { ref difficulty, .. } if difficulty == "Easy"));

        let out = serde_json::to_value(ServerWsMessage::Feedback { feedback: "ok".into(), score: 7 }).unwrap();
        assert_eq!(out, serde_json::json!({"type": "feedback", "feedback": "ok", "score": 7}));
    }

    #[test]
    fn unknown_ws_type_is_rejected() {
        assert!(serde_json::from_str::<ClientWsMessage>(r#"{"type":"save_settings"}"#).is_err());
    }
}
