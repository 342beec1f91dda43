//! Insert request compilation and plan rendering.

use chrono::{Months, NaiveDate};
use serde_json::Value;

use crate::config::LessonsConfig;
use crate::models::recurrence::Recurrence;

use super::error::InvalidInput;
use super::parse_date;
use super::plan::{ParamBinder, Plan};

/// A compiled, validated lesson-creation request.
///
/// Both boundaries are resolved at compile time: a missing count falls back
/// to the configured safety cap, a missing end date to one year after the raw
/// start date. Generation is therefore always bounded in both dimensions.
/// Teacher ids are deduplicated and sorted; an empty list means the series is
/// created without teacher links.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonSeries {
    title: Option<String>,
    teacher_ids: Vec<i64>,
    recurrence: Recurrence,
    lessons_count: i64,
    last_date: NaiveDate,
}

impl LessonSeries {
    /// Validates a raw JSON insert body and resolves its defaults.
    pub fn from_body(body: &Value, config: &LessonsConfig) -> Result<Self, InvalidInput> {
        let body = body.as_object().ok_or(InvalidInput::BodyExpected)?;

        let title = match body.get("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => return Err(InvalidInput::TitleNotString),
        };

        let teacher_ids = match body.get("teacherIds") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    let id = item
                        .as_i64()
                        .filter(|v| *v > 0)
                        .ok_or(InvalidInput::TeacherIdsNotPositive)?;
                    ids.push(id);
                }
                ids.sort_unstable();
                ids.dedup();
                ids
            }
            Some(_) => return Err(InvalidInput::TeacherIdsNotArray),
        };

        let days = match body.get("days") {
            Some(Value::Array(items)) if !items.is_empty() => {
                let mut days = Vec::with_capacity(items.len());
                for item in items {
                    let day = item
                        .as_u64()
                        .filter(|v| *v <= 6)
                        .ok_or(InvalidInput::DaysMissingOrInvalid)?;
                    days.push(day as u32);
                }
                days
            }
            _ => return Err(InvalidInput::DaysMissingOrInvalid),
        };

        let first_date = body
            .get("firstDate")
            .and_then(Value::as_str)
            .and_then(parse_date)
            .ok_or(InvalidInput::FirstDateMissingOrInvalid)?;

        let recurrence = Recurrence::new(&days, first_date)
            .map_err(|_| InvalidInput::DaysMissingOrInvalid)?;

        let count_value = body.get("lessonsCount").filter(|v| !v.is_null());
        let last_value = body.get("lastDate").filter(|v| !v.is_null());
        if count_value.is_some() && last_value.is_some() {
            return Err(InvalidInput::CountAndLastDateExclusive);
        }

        let lessons_count = match count_value {
            Some(value) => value
                .as_i64()
                .filter(|v| *v > 0)
                .ok_or(InvalidInput::LessonsCountInvalid)?,
            None => config.max_lessons,
        };

        let last_date = match last_value {
            Some(value) => {
                let parsed = value
                    .as_str()
                    .and_then(parse_date)
                    .ok_or(InvalidInput::LastDateInvalid)?;
                if parsed <= recurrence.first_date() {
                    return Err(InvalidInput::LastDateNotAfterFirst);
                }
                parsed
            }
            // The fallback window is anchored at the raw start date, not the
            // adjusted one.
            None => first_date
                .checked_add_months(Months::new(12))
                .ok_or(InvalidInput::LastDateInvalid)?,
        };

        Ok(Self {
            title,
            teacher_ids,
            recurrence,
            lessons_count,
            last_date,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn teacher_ids(&self) -> &[i64] {
        &self.teacher_ids
    }

    pub fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    pub fn lessons_count(&self) -> i64 {
        self.lessons_count
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Every occurrence date of the series, in order.
    ///
    /// Generation walks the recurrence until the end date, then the count cap
    /// cuts the prefix. This mirrors exactly what the rendered plan makes the
    /// database do, and is what the in-memory backend executes.
    pub fn occurrence_dates(&self) -> Vec<NaiveDate> {
        let last = self.last_date;
        let cap = usize::try_from(self.lessons_count).unwrap_or(usize::MAX);
        self.recurrence
            .dates()
            .take_while(move |d| *d <= last)
            .take(cap)
            .collect()
    }
}

/// Renders the single-statement insertion plan for a compiled series.
///
/// A recursive CTE generates the occurrence dates, a data-modifying CTE
/// inserts them, and, when teacher ids are present, a second insert links
/// every new row to every teacher. The statement returns the new ids.
///
/// Bind order is fixed: adjusted first date, title, day shifts, cycle
/// length, last date, count, then teacher ids.
pub fn insert_plan(series: &LessonSeries) -> Plan {
    let mut binder = ParamBinder::new();

    let first_date = binder.scalar("firstDate", series.recurrence().first_date());
    let title = binder.scalar("title", series.title().map(str::to_string));
    let shifts = binder.vector(
        "dayShifts",
        series.recurrence().day_shifts().iter().map(|s| i64::from(*s)),
        ",",
        |p| p.to_string(),
    );
    let cycle_len = binder.scalar("cycleLen", series.recurrence().cycle_len() as i64);
    let last_date = binder.scalar("lastDate", series.last_date());
    let count = binder.scalar("lessonsCount", series.lessons_count());

    let (link_cte, source_table) = if series.teacher_ids().is_empty() {
        (String::new(), "lessons_inserted")
    } else {
        let teacher_rows = binder.vector(
            "teacherIds",
            series.teacher_ids().iter().copied(),
            ", ",
            |p| format!("({p}::bigint)"),
        );
        (
            format!(
                ",\nlesson_teachers_inserted AS (\n  \
                 INSERT INTO lesson_teachers (lesson_id, teacher_id)\n    \
                 (SELECT L.lesson_id, T.id AS teacher_id\n     \
                 FROM lessons_inserted AS L\n     \
                 CROSS JOIN (VALUES {teacher_rows}) AS T(id))\n  \
                 RETURNING lesson_id\n)"
            ),
            "lesson_teachers_inserted",
        )
    };

    let text = format!(
        "WITH RECURSIVE lessons_input(n, date, title) AS (\n    \
         VALUES (0, {first_date}::date, {title})\n  \
         UNION ALL\n    \
         SELECT n + 1, date + (ARRAY[{shifts}]::integer[])[(n % {cycle_len}) + 1], title\n    \
         FROM lessons_input\n    \
         WHERE date + (ARRAY[{shifts}]::integer[])[(n % {cycle_len}) + 1] <= {last_date}::date\n\
         ),\n\
         lessons_inserted AS (\n  \
         INSERT INTO lessons (date, title)\n    \
         (SELECT date, title FROM lessons_input LIMIT {count})\n  \
         RETURNING id AS lesson_id\n\
         ){link_cte}\n\
         SELECT DISTINCT lesson_id FROM {source_table} ORDER BY lesson_id"
    );

    binder.into_plan(text)
}
