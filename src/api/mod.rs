//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/countdown/reset", post(reset_handler))
        .route("/countdown/start", post(start_handler))
        .route("/countdown/stop", post(stop_handler))
        .route("/displays", get(list_displays_handler))
        .route("/displays/:name", put(add_display_handler).delete(remove_display_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{display::DisplayBoard, tasks::TICK_PERIOD};

    fn app() -> (Router, Arc<AppState>) {
        let displays = Arc::new(DisplayBoard::new());
        displays.add("timer");
        let (state, task) = AppState::new(20554, "127.0.0.1".to_string(), 1.0, displays, TICK_PERIOD);
        tokio::spawn(task.run());
        let state = Arc::new(state);
        (create_router(Arc::clone(&state)), state)
    }

    async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test(start_paused = true)]
    async fn reset_uses_query_minutes() {
        let (router, _) = app();
        let (status, body) = call(&router, "POST", "/countdown/reset?minutes=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["countdown"]["remaining"]["seconds"], 120);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_defaults_to_max_time() {
        let (router, _) = app();
        let (_, body) = call(&router, "POST", "/countdown/reset").await;
        assert_eq!(body["countdown"]["remaining"]["seconds"], 60);
    }

    #[tokio::test(start_paused = true)]
    async fn negative_minutes_are_a_bad_request() {
        let (router, _) = app();
        let (status, body) = call(&router, "POST", "/countdown/reset?minutes=-3").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test(start_paused = true)]
    async fn start_before_reset_conflicts() {
        let (router, _) = app();
        let (status, body) = call(&router, "POST", "/countdown/start").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["countdown"]["phase"], "idle");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let (router, _) = app();
        for _ in 0..3 {
            let (status, body) = call(&router, "POST", "/countdown/stop").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "idle");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_rendered_displays() {
        let (router, _) = app();
        call(&router, "POST", "/countdown/reset?minutes=1").await;
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let (status, body) = call(&router, "GET", "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining_seconds"], 58);
        assert_eq!(body["displays"][0]["content"], "eta 0:59");
        assert_eq!(body["last_action"], "reset");
    }

    #[tokio::test(start_paused = true)]
    async fn displays_can_be_added_and_removed() {
        let (router, state) = app();
        let (status, _) = call(&router, "PUT", "/displays/sidebar").await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = call(&router, "PUT", "/displays/sidebar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.displays.len(), 2);

        let (status, _) = call(&router, "DELETE", "/displays/timer").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&router, "DELETE", "/displays/timer").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = call(&router, "GET", "/displays").await;
        assert_eq!(body, serde_json::json!([{ "name": "sidebar", "content": "" }]));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _) = app();
        let (status, body) = call(&router, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
