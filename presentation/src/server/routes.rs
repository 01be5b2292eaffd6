//! API routes

use super::AppState;
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use docent_application::AskQuestionInput;
use docent_domain::{QaExchange, Question, StructuredAnswer, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

/// Header carrying the caller identity
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Body of every non-200 response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// The caller identity, if the header is present.
fn user_id(headers: &HeaderMap) -> Result<Option<UserId>, ApiError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "x-user-id must be ASCII"))?;
    UserId::try_new(raw)
        .map(Some)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

// ============================================================================
// Answer Routes
// ============================================================================

pub fn api_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/ask", post(ask))
        .route("/api/history", get(history))
}

async fn ask(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<StructuredAnswer>, ApiError> {
    let Json(req) = body.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    let user_id = user_id(&headers)?;
    let question =
        Question::try_new(req.question).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!(user = ?user_id.as_ref().map(UserId::as_str), "Answering question");

    let mut input = AskQuestionInput::new(question);
    if let Some(user_id) = user_id {
        input = input.with_user(user_id);
    }

    Ok(Json(state.ask.execute(input).await))
}

async fn history(
    State(state): State<AppStateArc>,
    headers: HeaderMap,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<QaExchange>>, ApiError> {
    let Query(query) = query.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    let user_id = user_id(&headers)?
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "x-user-id header is required"))?;

    let records = state
        .history
        .execute(&user_id, query.limit)
        .await
        .map_err(|e| {
            error!(user = %user_id, "History lookup failed: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "history is unavailable")
        })?;

    Ok(Json(records))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
