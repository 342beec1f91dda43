//! Repository abstraction for lesson storage.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::LessonId;
use crate::models::lesson::LessonRecord;
use crate::query::filter::LessonFilter;
use crate::query::insert::LessonSeries;

/// Storage gateway for lessons.
///
/// Implementations execute a compiled request as one atomic unit: an insert
/// either persists every generated occurrence and teacher link, or nothing.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Probes the backing store.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Creates every occurrence of `series` plus its teacher links.
    ///
    /// Returns the new lesson ids in ascending order.
    async fn create_lessons(&self, series: &LessonSeries) -> RepositoryResult<Vec<LessonId>>;

    /// Fetches the lessons matching `filter`, ordered by id and paginated.
    async fn fetch_lessons(&self, filter: &LessonFilter) -> RepositoryResult<Vec<LessonRecord>>;
}
