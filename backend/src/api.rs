//! Public API surface for the lessons backend.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! and query types used by callers of the service layer. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::config::LessonsConfig;
pub use crate::models::lesson::LessonRecord;
pub use crate::models::lesson::LessonStudent;
pub use crate::models::lesson::LessonTeacher;
pub use crate::models::recurrence::Recurrence;
pub use crate::query::filter::CountFilter;
pub use crate::query::filter::DateFilter;
pub use crate::query::filter::LessonFilter;
pub use crate::query::insert::LessonSeries;
pub use crate::query::InvalidInput;

use serde::{Deserialize, Serialize};

/// Lesson identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LessonId(pub i64);

/// Teacher identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TeacherId(pub i64);

/// Student identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl LessonId {
    pub fn new(value: i64) -> Self {
        LessonId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TeacherId {
    pub fn new(value: i64) -> Self {
        TeacherId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl StudentId {
    pub fn new(value: i64) -> Self {
        StudentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LessonId> for i64 {
    fn from(id: LessonId) -> Self {
        id.0
    }
}
