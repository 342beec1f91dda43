//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::api::LessonId;
use crate::models::LessonRecord;
use crate::query::{InvalidInput, LessonsQuery};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Lessons
// =============================================================================

/// GET /
///
/// Retrieve a page of lessons with their rosters and assigned teachers,
/// filtered by the query string.
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(query): Query<LessonsQuery>,
) -> HandlerResult<Vec<LessonRecord>> {
    let lessons =
        services::get_lessons(state.repository.as_ref(), &state.config, &query).await?;
    Ok(Json(lessons))
}

/// POST /lessons
///
/// Create a recurring lesson series from a JSON body. Responds with the ids
/// of all created lessons as a flat array.
pub async fn add_lessons(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> HandlerResult<Vec<LessonId>> {
    let Some(Json(body)) = body else {
        return Err(InvalidInput::BodyExpected.into());
    };

    let ids = services::add_lessons(state.repository.as_ref(), &state.config, &body).await?;
    Ok(Json(ids))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Fallback
// =============================================================================

/// Handler for every route that is not part of the API.
pub async fn not_found() -> AppError {
    AppError::NotFound("No such resource".to_string())
}
