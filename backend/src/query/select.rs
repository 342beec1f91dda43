//! Retrieval plan rendering.

use super::filter::{CountFilter, DateFilter, LessonFilter};
use super::plan::{ParamBinder, Plan};

/// Renders the retrieval statement for a compiled filter.
///
/// The inner query aggregates each lesson's roster (with the visited count),
/// the outer query aggregates linked teachers. Date and status filter rows
/// before aggregation; roster size filters the inner aggregate; teacher
/// membership filters the outer aggregate through an array-overlap test.
///
/// Bind order is fixed: date value(s), status, roster-size value(s), teacher
/// ids, page size, offset.
pub fn select_plan(filter: &LessonFilter) -> Plan {
    let mut binder = ParamBinder::new();

    let mut where_clauses: Vec<String> = Vec::new();
    match filter.date {
        Some(DateFilter::On(day)) => {
            let token = binder.scalar("date", day);
            where_clauses.push(format!("L.date = {token}"));
        }
        Some(DateFilter::Between(from, to)) => {
            let from_token = binder.scalar("dateFrom", from);
            let to_token = binder.scalar("dateTo", to);
            where_clauses.push(format!(
                "L.date BETWEEN SYMMETRIC {from_token} AND {to_token}"
            ));
        }
        None => {}
    }
    if let Some(status) = filter.status {
        let token = binder.scalar("status", status);
        where_clauses.push(format!("L.status = {token}"));
    }
    let where_sql = if where_clauses.is_empty() {
        String::new()
    } else {
        let joined = where_clauses
            .iter()
            .map(|clause| format!("({clause})"))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("\n  WHERE {joined}")
    };

    let having_roster = match filter.students_count {
        Some(CountFilter::Exactly(count)) => {
            let token = binder.scalar("studentsCount", count);
            format!("\n  HAVING COUNT(S.id) = {token}")
        }
        Some(CountFilter::Between(from, to)) => {
            let from_token = binder.scalar("studentsFrom", from);
            let to_token = binder.scalar("studentsTo", to);
            format!("\n  HAVING COUNT(S.id) BETWEEN SYMMETRIC {from_token} AND {to_token}")
        }
        None => String::new(),
    };

    let having_teachers = match &filter.teacher_ids {
        Some(ids) => {
            let tokens = binder.vector("teacherIds", ids.iter().copied(), ",", |p| p.to_string());
            format!(
                "\nHAVING COALESCE(ARRAY_AGG(LT.teacher_id) FILTER (WHERE LT.teacher_id IS NOT NULL), ARRAY[]::bigint[]) && ARRAY[{tokens}]::bigint[]"
            )
        }
        None => String::new(),
    };

    let limit = binder.scalar("lessonsPerPage", filter.lessons_per_page);
    let offset_sql = match filter.offset {
        Some(offset) => {
            let token = binder.scalar("offset", offset);
            format!("\nOFFSET {token}")
        }
        None => String::new(),
    };

    let text = format!(
        "SELECT\n  \
         LL.id, LL.date, LL.title, LL.status, LL.\"visitCount\", LL.students,\n  \
         COALESCE(\n    \
         JSONB_AGG(JSON_BUILD_OBJECT('id', T.id, 'name', T.name) ORDER BY T.id)\n      \
         FILTER (WHERE T.id IS NOT NULL),\n    \
         JSONB_BUILD_ARRAY()\n  \
         ) AS teachers\n\
         FROM (\n  \
         SELECT\n    \
         L.id, L.date, L.title, L.status,\n    \
         (COUNT(S.id) FILTER (WHERE LS.visit))::int4 AS \"visitCount\",\n    \
         COALESCE(\n      \
         JSONB_AGG(JSON_BUILD_OBJECT('id', S.id, 'name', S.name, 'visit', LS.visit) ORDER BY S.id)\n        \
         FILTER (WHERE S.id IS NOT NULL),\n      \
         JSONB_BUILD_ARRAY()\n    \
         ) AS students\n  \
         FROM lessons AS L\n  \
         LEFT JOIN lesson_students AS LS ON L.id = LS.lesson_id\n  \
         LEFT JOIN students AS S ON S.id = LS.student_id{where_sql}\n  \
         GROUP BY L.id{having_roster}\n\
         ) AS LL\n\
         LEFT JOIN lesson_teachers AS LT ON LL.id = LT.lesson_id\n\
         LEFT JOIN teachers AS T ON T.id = LT.teacher_id\n\
         GROUP BY LL.id, LL.date, LL.title, LL.status, LL.\"visitCount\", LL.students{having_teachers}\n\
         ORDER BY LL.id\n\
         LIMIT {limit}{offset_sql}"
    );

    binder.into_plan(text)
}
