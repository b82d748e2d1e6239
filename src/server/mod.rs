use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::scoreboard::{normalize_payload, FetchError, ScoreboardSource, ScoresResponse};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ScoreboardSource>,
}

/// Build the Axum router for the relay.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/nfl/scores", get(scores_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(Arc::new(state))
}

/// Request-level failure, always rendered as `500 {"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Upstream(FetchError),
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        ApiError::Upstream(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Upstream(e @ (FetchError::Transport(_) | FetchError::Decode(_))) => {
                error!("Request error: {}", e);
                e.to_string()
            }
            ApiError::Upstream(FetchError::Status(status)) => {
                error!("Upstream returned {}", status);
                "Failed to fetch from ESPN".to_string()
            }
        };
        internal_error(message)
    }
}

/// Anything that blows up inside a handler still gets a JSON 500, without detail.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Unexpected error: {}", detail);
    internal_error("Internal server error")
}

fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message.into() })),
    )
        .into_response()
}

/// GET /nfl/scores
async fn scores_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScoresResponse>, ApiError> {
    let payload = state.source.fetch_scoreboard().await?;
    let games = normalize_payload(&payload);
    info!("Served {} games from {}", games.len(), state.source.name());
    Ok(Json(ScoresResponse::from(games)))
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
