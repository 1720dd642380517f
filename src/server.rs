#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! HTTP surface consumed by the Spring backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::ConfigHandle,
    feedback, generation,
    llm::{ChatBackend, OpenAiBackend},
    types::{
        AssignmentGenerationResponse, CurriculumResponse, FeedbackRequest, FeedbackResponse,
        StudyRequest,
    },
};

/// Errors surfaced to HTTP clients as `{"detail": ...}` with status 500.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// No OpenAI API key was configured.
    #[error("OpenAI API 키가 설정되지 않았습니다.")]
    MissingApiKey,
    /// The upstream model call failed.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// Wraps an upstream failure with a caller-facing prefix.
    fn upstream(prefix: &str, err: anyhow::Error) -> Self {
        tracing::error!("{prefix}: {err:#}");
        ApiError::Upstream(format!("{prefix}: {err:#}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": self.to_string() })))
            .into_response()
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration.
    config: ConfigHandle,
    /// Upstream model, absent when no API key is configured.
    llm:    Option<Arc<dyn ChatBackend>>,
}

impl AppState {
    /// Creates state with an explicit backend.
    pub fn new(config: ConfigHandle, llm: Option<Arc<dyn ChatBackend>>) -> Self {
        Self { config, llm }
    }

    /// Creates state with the OpenAI backend, if credentials are configured.
    pub fn from_config(config: ConfigHandle) -> Self {
        let llm = config
            .openai()
            .map(|env| Arc::new(OpenAiBackend::new(env)) as Arc<dyn ChatBackend>);
        if llm.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; generation endpoints will fail");
        }
        Self::new(config, llm)
    }

    /// Returns the upstream model or the missing-key error.
    fn llm(&self) -> Result<&dyn ChatBackend, ApiError> {
        self.llm.as_deref().ok_or(ApiError::MissingApiKey)
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/generate-curriculum", post(generate_curriculum))
        .route("/auto-generate-curriculum", post(generate_curriculum))
        .route("/generate-assignments", post(generate_assignments))
        .route("/generate-feedback", post(generate_feedback))
        .route("/models", get(models))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: ConfigHandle) -> Result<()> {
    let addr = config.bind_addr();
    let app = router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {addr}"))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Could not install Ctrl-C handler: {e}");
            }
        })
        .await
        .context("Server error")
}

/// Service banner.
async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Curriculum Generator API", "status": "running" }))
}

/// Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": chrono::Local::now().to_rfc3339() }))
}

/// `POST /generate-curriculum` and `POST /auto-generate-curriculum`.
async fn generate_curriculum(
    State(state): State<AppState>,
    Json(request): Json<StudyRequest>,
) -> Result<Json<CurriculumResponse>, ApiError> {
    let llm = state.llm()?;
    generation::generate_curriculum(llm, &state.config, &request)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("커리큘럼 생성 중 오류가 발생했습니다", e))
}

/// `POST /generate-assignments`.
async fn generate_assignments(
    State(state): State<AppState>,
    Json(request): Json<StudyRequest>,
) -> Result<Json<AssignmentGenerationResponse>, ApiError> {
    let llm = state.llm()?;
    generation::generate_assignments(llm, &state.config, &request)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("과제 생성 중 오류가 발생했습니다", e))
}

/// `POST /generate-feedback`; always answers, falling back to the heuristic.
async fn generate_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Json<FeedbackResponse> {
    Json(feedback::evaluate(&state.config, state.llm.as_deref(), &request).await)
}

/// `GET /models`.
async fn models(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let llm = state.llm()?;
    let models = llm
        .list_models()
        .await
        .map_err(|e| ApiError::upstream("모델 목록 조회 중 오류가 발생했습니다", e))?;
    Ok(Json(json!({ "models": models })))
}
