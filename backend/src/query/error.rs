//! Validation errors for lesson requests.

use thiserror::Error;

/// A malformed or contradictory request field.
///
/// Raised during compilation, before any plan is built or any storage call is
/// made. Messages are user-facing and returned verbatim in 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Body expected")]
    BodyExpected,

    #[error("\"title\" must be a string")]
    TitleNotString,

    #[error("\"teacherIds\" must be array")]
    TeacherIdsNotArray,

    #[error("\"teacherIds\" must be positive integers array")]
    TeacherIdsNotPositive,

    #[error("\"days\" missing or invalid")]
    DaysMissingOrInvalid,

    #[error("\"firstDate\" missing or invalid")]
    FirstDateMissingOrInvalid,

    #[error("\"lessonsCount\" and \"lastDate\" are mutually exclusive")]
    CountAndLastDateExclusive,

    #[error("\"lessonsCount\" has invalid value")]
    LessonsCountInvalid,

    #[error("\"lastDate\" has invalid value")]
    LastDateInvalid,

    #[error("\"lastDate\" must be after \"firstDate\"(adjusted by \"days\")")]
    LastDateNotAfterFirst,

    #[error("Invalid \"date\" format")]
    DateFormat,

    #[error("Invalid \"status\" format")]
    StatusFormat,

    #[error("Invalid \"studentsCount\" format")]
    StudentsCountFormat,

    #[error("\"page\" must be positive integer")]
    PageInvalid,

    #[error("\"lessonsPerPage\" must be positive integer")]
    LessonsPerPageInvalid,
}
