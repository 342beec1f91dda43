//! In-memory repository implementation.
//!
//! Mirrors the relational layout of the PostgreSQL backend (lessons,
//! teachers, students and the two link tables) in plain hash maps, so the
//! service layer can be exercised without a database. Used by unit and
//! integration tests and by local development runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{LessonId, StudentId, TeacherId};
use crate::db::repository::{
    ErrorContext, LessonRepository, RepositoryError, RepositoryResult,
};
use crate::models::{LessonRecord, LessonStudent, LessonTeacher};
use crate::query::{LessonFilter, LessonSeries};

#[derive(Debug, Clone)]
struct StoredLesson {
    date: NaiveDate,
    title: Option<String>,
    status: i32,
}

/// Backing store. Ids are assigned sequentially starting at 1, matching
/// the BIGSERIAL columns of the PostgreSQL schema.
#[derive(Debug, Default)]
struct LessonsData {
    lessons: HashMap<i64, StoredLesson>,
    teachers: HashMap<i64, String>,
    students: HashMap<i64, String>,
    lesson_teachers: Vec<(i64, i64)>,
    lesson_students: Vec<(i64, i64, bool)>,
    next_lesson_id: i64,
    next_teacher_id: i64,
    next_student_id: i64,
}

impl LessonsData {
    fn new() -> Self {
        Self {
            next_lesson_id: 1,
            next_teacher_id: 1,
            next_student_id: 1,
            ..Default::default()
        }
    }
}

/// In-memory implementation of `LessonRepository`.
///
/// Cloning is cheap and clones share the same underlying store.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LessonsData>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LessonsData::new())),
        }
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LessonsData>> {
        self.data
            .read()
            .map_err(|_| RepositoryError::internal("lessons store lock poisoned"))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LessonsData>> {
        self.data
            .write()
            .map_err(|_| RepositoryError::internal("lessons store lock poisoned"))
    }

    /// Register a teacher and return its id.
    pub fn add_teacher(&self, name: &str) -> RepositoryResult<TeacherId> {
        let mut data = self.write()?;
        let id = data.next_teacher_id;
        data.next_teacher_id += 1;
        data.teachers.insert(id, name.to_string());
        Ok(TeacherId::new(id))
    }

    /// Register a student and return its id.
    pub fn add_student(&self, name: &str) -> RepositoryResult<StudentId> {
        let mut data = self.write()?;
        let id = data.next_student_id;
        data.next_student_id += 1;
        data.students.insert(id, name.to_string());
        Ok(StudentId::new(id))
    }

    /// Insert a single lesson row directly, bypassing series expansion.
    pub fn add_lesson(
        &self,
        date: NaiveDate,
        title: Option<&str>,
        status: i32,
    ) -> RepositoryResult<LessonId> {
        let mut data = self.write()?;
        let id = data.next_lesson_id;
        data.next_lesson_id += 1;
        data.lessons.insert(
            id,
            StoredLesson {
                date,
                title: title.map(str::to_string),
                status,
            },
        );
        Ok(LessonId::new(id))
    }

    /// Assign a teacher to a lesson.
    pub fn link_teacher(&self, lesson: LessonId, teacher: TeacherId) -> RepositoryResult<()> {
        let mut data = self.write()?;
        if !data.lessons.contains_key(&lesson.value()) {
            return Err(unknown_row("lesson_teachers", "lesson", lesson.value()));
        }
        if !data.teachers.contains_key(&teacher.value()) {
            return Err(unknown_row("lesson_teachers", "teacher", teacher.value()));
        }
        let pair = (lesson.value(), teacher.value());
        if data.lesson_teachers.contains(&pair) {
            return Err(RepositoryError::query(
                "duplicate key value violates unique constraint \"lesson_teachers_pkey\"",
            ));
        }
        data.lesson_teachers.push(pair);
        Ok(())
    }

    /// Enroll a student in a lesson with the given attendance flag.
    pub fn enroll_student(
        &self,
        lesson: LessonId,
        student: StudentId,
        visit: bool,
    ) -> RepositoryResult<()> {
        let mut data = self.write()?;
        if !data.lessons.contains_key(&lesson.value()) {
            return Err(unknown_row("lesson_students", "lesson", lesson.value()));
        }
        if !data.students.contains_key(&student.value()) {
            return Err(unknown_row("lesson_students", "student", student.value()));
        }
        if data
            .lesson_students
            .iter()
            .any(|(l, s, _)| *l == lesson.value() && *s == student.value())
        {
            return Err(RepositoryError::query(
                "duplicate key value violates unique constraint \"lesson_students_pkey\"",
            ));
        }
        data.lesson_students
            .push((lesson.value(), student.value(), visit));
        Ok(())
    }

    /// Remove all rows from every table.
    pub fn clear(&self) -> RepositoryResult<()> {
        let mut data = self.write()?;
        *data = LessonsData::new();
        Ok(())
    }

    /// Number of lesson rows currently stored.
    pub fn lesson_count(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.lessons.len())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_row(table: &str, entity: &str, id: i64) -> RepositoryError {
    RepositoryError::query_with_context(
        format!("insert into \"{table}\" violates foreign key constraint"),
        ErrorContext::new("insert")
            .with_entity(entity)
            .with_details(format!("no row with id {id}")),
    )
}

#[async_trait]
impl LessonRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.read()?;
        Ok(true)
    }

    async fn create_lessons(&self, series: &LessonSeries) -> RepositoryResult<Vec<LessonId>> {
        let dates = series.occurrence_dates();
        let mut data = self.write()?;

        // Validate references before touching any table so a failure leaves
        // the store unchanged, like a rolled-back transaction would.
        for teacher_id in series.teacher_ids() {
            if !data.teachers.contains_key(teacher_id) {
                return Err(unknown_row("lesson_teachers", "teacher", *teacher_id)
                    .with_operation("create_lessons"));
            }
        }

        let mut ids = Vec::with_capacity(dates.len());
        for date in dates {
            let id = data.next_lesson_id;
            data.next_lesson_id += 1;
            data.lessons.insert(
                id,
                StoredLesson {
                    date,
                    title: series.title().map(str::to_string),
                    status: 0,
                },
            );
            for teacher_id in series.teacher_ids() {
                data.lesson_teachers.push((id, *teacher_id));
            }
            ids.push(LessonId::new(id));
        }
        Ok(ids)
    }

    async fn fetch_lessons(&self, filter: &LessonFilter) -> RepositoryResult<Vec<LessonRecord>> {
        let data = self.read()?;

        let mut lesson_ids: Vec<i64> = data.lessons.keys().copied().collect();
        lesson_ids.sort_unstable();

        let mut records = Vec::new();
        for id in lesson_ids {
            let Some(lesson) = data.lessons.get(&id) else {
                continue;
            };
            if let Some(date_filter) = &filter.date {
                if !date_filter.contains(lesson.date) {
                    continue;
                }
            }
            if let Some(status) = filter.status {
                if lesson.status != status {
                    continue;
                }
            }

            let mut students: Vec<LessonStudent> = data
                .lesson_students
                .iter()
                .filter(|(lesson_id, _, _)| *lesson_id == id)
                .filter_map(|(_, student_id, visit)| {
                    data.students.get(student_id).map(|name| LessonStudent {
                        id: StudentId::new(*student_id),
                        name: name.clone(),
                        visit: *visit,
                    })
                })
                .collect();
            students.sort_unstable_by_key(|s| s.id.value());

            // Roster size counts every enrolled student, attended or not.
            if let Some(count_filter) = &filter.students_count {
                if !count_filter.contains(students.len() as i64) {
                    continue;
                }
            }

            let mut teacher_ids: Vec<i64> = data
                .lesson_teachers
                .iter()
                .filter(|(lesson_id, _)| *lesson_id == id)
                .map(|(_, teacher_id)| *teacher_id)
                .collect();
            teacher_ids.sort_unstable();
            teacher_ids.dedup();

            if let Some(requested) = &filter.teacher_ids {
                if !teacher_ids.iter().any(|t| requested.contains(t)) {
                    continue;
                }
            }

            let teachers: Vec<LessonTeacher> = teacher_ids
                .into_iter()
                .filter_map(|teacher_id| {
                    data.teachers.get(&teacher_id).map(|name| LessonTeacher {
                        id: TeacherId::new(teacher_id),
                        name: name.clone(),
                    })
                })
                .collect();

            let visit_count = students.iter().filter(|s| s.visit).count() as i32;

            records.push(LessonRecord {
                id: LessonId::new(id),
                date: lesson.date,
                title: lesson.title.clone(),
                status: lesson.status,
                visit_count,
                students,
                teachers,
            });
        }

        let offset = filter
            .offset
            .and_then(|o| usize::try_from(o).ok())
            .unwrap_or(0);
        let limit = usize::try_from(filter.lessons_per_page).unwrap_or(usize::MAX);
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }
}
