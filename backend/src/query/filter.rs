//! Retrieval request compilation.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::LessonsConfig;

use super::error::InvalidInput;
use super::parse_date;

/// Raw retrieval fields as they arrive from a query string.
///
/// Everything is an optional string; validation happens in
/// [`LessonFilter::from_query`] so each field fails with its own message
/// instead of a generic deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonsQuery {
    pub date: Option<String>,
    pub status: Option<String>,
    pub teacher_ids: Option<String>,
    pub students_count: Option<String>,
    pub page: Option<String>,
    pub lessons_per_page: Option<String>,
}

/// Date constraint on an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    On(NaiveDate),
    /// Inclusive range; bounds are kept as given and applied
    /// order-independently.
    Between(NaiveDate, NaiveDate),
}

impl DateFilter {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::On(day) => date == day,
            DateFilter::Between(a, b) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                lo <= date && date <= hi
            }
        }
    }
}

/// Roster-size constraint on an occurrence.
///
/// Counts every assigned student, visited or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountFilter {
    Exactly(i64),
    Between(i64, i64),
}

impl CountFilter {
    pub fn contains(&self, count: i64) -> bool {
        match *self {
            CountFilter::Exactly(n) => count == n,
            CountFilter::Between(a, b) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                lo <= count && count <= hi
            }
        }
    }
}

/// A compiled, validated retrieval request.
///
/// Absent fields impose no constraint. `teacher_ids` is deduplicated and
/// sorted; an occurrence matches when at least one of its linked teachers is
/// in the list. `offset` is present only when a page beyond the first was
/// requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFilter {
    pub date: Option<DateFilter>,
    pub status: Option<i32>,
    pub teacher_ids: Option<Vec<i64>>,
    pub students_count: Option<CountFilter>,
    pub offset: Option<i64>,
    pub lessons_per_page: i64,
}

impl LessonFilter {
    /// Validates raw retrieval fields and resolves pagination.
    pub fn from_query(query: &LessonsQuery, config: &LessonsConfig) -> Result<Self, InvalidInput> {
        let date = match &query.date {
            None => None,
            Some(raw) => Some(compile_date(raw)?),
        };

        let status = match &query.status {
            None => None,
            Some(raw) => Some(compile_status(raw)?),
        };

        let teacher_ids = match &query.teacher_ids {
            None => None,
            Some(raw) => compile_teacher_ids(raw)?,
        };

        let students_count = match &query.students_count {
            None => None,
            Some(raw) => Some(compile_students_count(raw)?),
        };

        let page = match &query.page {
            None => None,
            Some(raw) => Some(
                parse_int(raw)
                    .filter(|p| *p > 0)
                    .ok_or(InvalidInput::PageInvalid)?,
            ),
        };

        let lessons_per_page = match &query.lessons_per_page {
            None => config.lessons_per_page,
            Some(raw) => parse_int(raw)
                .filter(|n| *n > 0)
                .ok_or(InvalidInput::LessonsPerPageInvalid)?,
        };

        // The first page needs no offset clause. The product can exceed i64
        // for a huge page number; that page is unreachable anyway.
        let offset = match page.filter(|p| *p > 1) {
            Some(p) => Some(
                (p - 1)
                    .checked_mul(lessons_per_page)
                    .ok_or(InvalidInput::PageInvalid)?,
            ),
            None => None,
        };

        Ok(Self {
            date,
            status,
            teacher_ids,
            students_count,
            offset,
            lessons_per_page,
        })
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn compile_date(raw: &str) -> Result<DateFilter, InvalidInput> {
    let mut dates = Vec::new();
    for part in raw.split(',') {
        dates.push(parse_date(part).ok_or(InvalidInput::DateFormat)?);
    }
    match dates.as_slice() {
        [one] => Ok(DateFilter::On(*one)),
        [a, b] => Ok(DateFilter::Between(*a, *b)),
        _ => Err(InvalidInput::DateFormat),
    }
}

fn compile_status(raw: &str) -> Result<i32, InvalidInput> {
    match raw.trim().parse::<i32>() {
        Ok(status @ (0 | 1)) => Ok(status),
        _ => Err(InvalidInput::StatusFormat),
    }
}

/// An empty resulting list disables the constraint entirely; it never means
/// "match nothing".
fn compile_teacher_ids(raw: &str) -> Result<Option<Vec<i64>>, InvalidInput> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part
            .parse::<i64>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or(InvalidInput::TeacherIdsNotPositive)?;
        ids.push(id);
    }
    if ids.is_empty() {
        return Ok(None);
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(Some(ids))
}

fn compile_students_count(raw: &str) -> Result<CountFilter, InvalidInput> {
    let mut counts = Vec::new();
    for part in raw.split(',') {
        counts.push(
            parse_int(part)
                .filter(|v| *v >= 0)
                .ok_or(InvalidInput::StudentsCountFormat)?,
        );
    }
    match counts.as_slice() {
        [one] => Ok(CountFilter::Exactly(*one)),
        [a, b] => Ok(CountFilter::Between(*a, *b)),
        _ => Err(InvalidInput::StudentsCountFormat),
    }
}
