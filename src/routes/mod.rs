//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - `POST /generate-question` and `POST /evaluate-answer` (paths the frontend calls)
/// - `GET /health`
/// - WebSocket at `/ws`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(http::http_health))
        .route("/generate-question", post(http::http_generate_question))
        .route("/evaluate-answer", post(http::http_evaluate_answer))
        .route("/ws", get(ws::ws_upgrade))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::BotConfig;
    use crate::error::{ANSWER_TOO_SHORT, INTERNAL_ERROR};
    use crate::llm::testing::StubGenerator;

    fn app(stub: Arc<StubGenerator>) -> Router {
        build_router(Arc::new(AppState::new(stub, BotConfig::default())))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let res = app(Arc::new(StubGenerator::replying(&["unused"])))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!({"ok": true}));
    }

    #[tokio::test]
    async fn generate_question_end_to_end() {
        let stub = Arc::new(StubGenerator::replying(&["  Given an array of integers, return the two indices that sum to a target.\n"]));
        let (status, body) = post_json(
            app(stub.clone()),
            "/generate-question",
            json!({"difficulty": "Easy", "topic": "arrays"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let question = body["question"].as_str().unwrap();
        assert!(!question.is_empty());
        assert_eq!(question, question.trim());
        assert!(body.get("detail").is_none());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn generate_question_failure_is_500() {
        let (status, body) = post_json(
            app(Arc::new(StubGenerator::failing("quota exceeded"))),
            "/generate-question",
            json!({"difficulty": "Hard", "topic": "graphs"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], INTERNAL_ERROR);
        assert!(body.get("question").is_none());
    }

    #[tokio::test]
    async fn missing_topic_is_rejected_by_extractor() {
        let stub = Arc::new(StubGenerator::replying(&["unused"]));
        let (status, _) = post_json(app(stub.clone()), "/generate-question", json!({"difficulty": "Easy"})).await;
        assert!(status.is_client_error());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn short_answer_is_400_without_model_call() {
        let stub = Arc::new(StubGenerator::replying(&["Score: 10/10"]));
        let (status, body) = post_json(app(stub.clone()), "/evaluate-answer", json!({"answer": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": ANSWER_TOO_SHORT}));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn evaluate_answer_end_to_end() {
        let stub = Arc::new(StubGenerator::replying(&[
            "Correct and clear. Consider the empty-input case.\n\n**Score: 8/10**",
        ]));
        let (status, body) = post_json(
            app(stub),
            "/evaluate-answer",
            json!({"answer": "Use a hash map from value to index, single pass, O(n)."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 8);
        assert!(body["feedback"].as_str().unwrap().ends_with("**Score: 8/10**"));
    }

    #[tokio::test]
    async fn evaluate_answer_failure_is_500() {
        let (status, body) = post_json(
            app(Arc::new(StubGenerator::failing("timed out"))),
            "/evaluate-answer",
            json!({"answer": "a long enough answer to pass validation"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let res = app(Arc::new(StubGenerator::replying(&["unused"])))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers().get("access-control-allow-origin").unwrap(), "*");
    }
}
