//! Lesson scheduling services.
//!
//! Each service compiles a raw transport-level request into a validated
//! value, hands it to the repository and returns the storage result
//! untouched. No SQL and no HTTP types appear at this level.

use serde_json::Value;

use crate::api::LessonId;
use crate::config::LessonsConfig;
use crate::db::repository::{LessonRepository, RepositoryError, RepositoryResult};
use crate::models::LessonRecord;
use crate::query::{InvalidInput, LessonFilter, LessonSeries, LessonsQuery};

/// Error returned by lesson services.
///
/// Either the request itself was malformed or storage failed; the two are
/// kept apart so the transport can map them to different status codes.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Compile a request body into a lesson series and store every occurrence.
///
/// Returns the ids of the created lessons. Creation is atomic; on any
/// failure no lesson is stored.
pub async fn add_lessons<R>(
    repo: &R,
    config: &LessonsConfig,
    body: &Value,
) -> Result<Vec<LessonId>, ServiceError>
where
    R: LessonRepository + ?Sized,
{
    let series = LessonSeries::from_body(body, config)?;
    Ok(repo.create_lessons(&series).await?)
}

/// Compile query-string filters and fetch the matching page of lessons.
pub async fn get_lessons<R>(
    repo: &R,
    config: &LessonsConfig,
    query: &LessonsQuery,
) -> Result<Vec<LessonRecord>, ServiceError>
where
    R: LessonRepository + ?Sized,
{
    let filter = LessonFilter::from_query(query, config)?;
    Ok(repo.fetch_lessons(&filter).await?)
}

/// Check storage availability.
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: LessonRepository + ?Sized,
{
    repo.health_check().await
}
