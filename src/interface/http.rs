//! # HTTP Interface
//!
//! The JSON surface the desktop frontend talks to. Thin by design: every
//! handler validates the request shape, calls into the application layer,
//! and serializes the outcome. No business logic lives here.

use crate::application::engine::Engine;
use crate::domain::config::ServerConfig;
use crate::domain::profile::UserProfile;
use crate::infrastructure::memory::ProfileStore;
use crate::strings::messages;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub store: Arc<ProfileStore>,
    pub ai_configured: bool,
}

pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/command", post(command))
        .route("/memory", get(memory).delete(clear_memory))
        .layer(cors_layer(&server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Last line of defense: a fault that escapes a handler becomes a generic
/// JSON 500 instead of a dropped connection.
fn panic_response(
    _err: Box<dyn std::any::Any + Send + 'static>,
) -> axum::http::Response<axum::body::Body> {
    tracing::error!("Handler panicked");
    let body = serde_json::json!({
        "success": false,
        "response": "Internal server error",
    })
    .to_string();
    axum::http::Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body))
        .unwrap_or_default()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let mut allowed = Vec::new();
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => allowed.push(value),
            Err(_) => tracing::warn!("Skipping invalid CORS origin: {}", origin),
        }
    }
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "valet",
        "status": "running",
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let status = if state.ai_configured {
        "ready"
    } else {
        "needs_configuration"
    };
    Json(serde_json::json!({
        "status": status,
        "ai_configured": state.ai_configured,
    }))
}

async fn command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Response {
    if request.command.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "response": "Empty command",
            })),
        )
            .into_response();
    }

    let outcome = state
        .engine
        .handle_command(&request.command, request.context.as_deref())
        .await;

    Json(CommandResponse {
        success: true,
        response: outcome.response,
        code: outcome.code,
        language: outcome.language,
    })
    .into_response()
}

#[derive(Debug, Serialize)]
struct MemoryResponse {
    success: bool,
    summary: String,
    profile: UserProfile,
}

async fn memory(State(state): State<AppState>) -> Json<MemoryResponse> {
    let profile = state.store.snapshot().await;
    Json(MemoryResponse {
        success: true,
        summary: profile.memory_summary(),
        profile,
    })
}

async fn clear_memory(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.store.clear().await;
    Json(serde_json::json!({
        "success": true,
        "message": messages::MEMORY_CLEARED,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::executor::PlanExecutor;
    use crate::application::planner::IntentPlanner;
    use crate::domain::config::{PipelineMode, TimeoutConfig};
    use crate::domain::traits::LlmProvider;
    use crate::infrastructure::actions::workspace::Workspace;
    use crate::infrastructure::actions::ActionRegistry;
    use crate::infrastructure::memory::extract::RegexFactExtractor;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct FakeLlm;

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn completion(&self, _prompt: &str) -> Result<String, String> {
            Ok("Just chatting.".to_string())
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    fn app(dir: &TempDir) -> Router {
        let workspace = Workspace::open(dir.path().join("ws")).unwrap();
        let registry = ActionRegistry::new(workspace, TimeoutConfig::default());
        let llm: Arc<dyn LlmProvider> = Arc::new(FakeLlm);
        let store = Arc::new(ProfileStore::open(
            dir.path().join("user_memory.json"),
            Box::new(RegexFactExtractor::new()),
        ));
        let engine = Arc::new(Engine::new(
            IntentPlanner::new(llm.clone(), PipelineMode::Actions),
            PlanExecutor::new(registry, llm),
            store.clone(),
        ));
        let state = AppState {
            engine,
            store,
            ai_configured: true,
        };
        router(state, &ServerConfig::default())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ready() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ready");
        assert_eq!(json["ai_configured"], true);
    }

    #[tokio::test]
    async fn test_command_round_trip() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(
                Request::post("/command")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"command": "hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["response"], "Just chatting.");
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir)
            .oneshot(
                Request::post("/command")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"command": "   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_memory_get_and_clear() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let response = app
            .clone()
            .oneshot(Request::get("/memory").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json["summary"].as_str().unwrap().contains("Name"));

        let response = app
            .oneshot(
                Request::delete("/memory")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["message"], messages::MEMORY_CLEARED);
    }
}
