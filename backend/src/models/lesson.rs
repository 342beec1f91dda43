//! Lesson occurrence records as returned by retrieval.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{LessonId, StudentId, TeacherId};

/// One student on a lesson's roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonStudent {
    pub id: StudentId,
    pub name: String,
    /// Whether the student attended this occurrence.
    pub visit: bool,
}

/// One teacher linked to a lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonTeacher {
    pub id: TeacherId,
    pub name: String,
}

/// A scheduled lesson occurrence with its roster and linked teachers.
///
/// `visit_count` counts roster entries with `visit = true`; the roster itself
/// always lists every assigned student. Both lists are ordered by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonRecord {
    pub id: LessonId,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub status: i32,
    #[serde(rename = "visitCount")]
    pub visit_count: i32,
    pub students: Vec<LessonStudent>,
    pub teachers: Vec<LessonTeacher>,
}
