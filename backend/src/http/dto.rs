//! Data Transfer Objects for the HTTP API.
//!
//! Lesson rows serialize in their wire shape already, so the response types
//! are re-exported from the model layer. Only shapes specific to the HTTP
//! surface are defined here.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::models::{LessonRecord, LessonStudent, LessonTeacher};
pub use crate::query::LessonsQuery;

/// Response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,
    /// Storage backend status
    pub database: String,
}
