//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::LessonsConfig;
use crate::db::repository::LessonRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn LessonRepository>,
    /// Pagination and series-size limits
    pub config: LessonsConfig,
}

impl AppState {
    /// Create a new application state with the given repository and limits.
    pub fn new(repository: Arc<dyn LessonRepository>, config: LessonsConfig) -> Self {
        Self { repository, config }
    }
}
