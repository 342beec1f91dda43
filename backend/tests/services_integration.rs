use chrono::NaiveDate;
use serde_json::json;

use lessons_rust::config::LessonsConfig;
use lessons_rust::db::repositories::LocalRepository;
use lessons_rust::query::LessonsQuery;
use lessons_rust::services::{add_lessons, get_lessons, health_check, ServiceError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A term of lessons with known teachers, rosters and attendance.
///
/// Ids are assigned sequentially from 1, so lesson 1 is the May 15 algebra
/// class and lesson 8 is the August 26 recital.
fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();

    let teachers: Vec<_> = ["Alice Carter", "Brian Holt", "Clara Mills", "Derek Shaw"]
        .iter()
        .map(|name| repo.add_teacher(name).unwrap())
        .collect();
    let students: Vec<_> = ["Emma Lewis", "Felix Grant", "Grace Yu", "Henry Doyle"]
        .iter()
        .map(|name| repo.add_student(name).unwrap())
        .collect();

    let lessons = [
        (date(2019, 5, 15), Some("Algebra"), 1),
        (date(2019, 5, 18), None, 0),
        (date(2019, 6, 17), Some("Geometry"), 1),
        (date(2019, 5, 1), None, 1),
        (date(2019, 6, 20), None, 0),
        (date(2019, 7, 22), Some("Chorus"), 1),
        (date(2019, 8, 1), None, 0),
        (date(2019, 8, 26), Some("Recital"), 1),
        (date(2019, 9, 3), None, 1),
    ]
    .map(|(day, title, status)| repo.add_lesson(day, title, status).unwrap());

    repo.link_teacher(lessons[0], teachers[0]).unwrap();
    repo.link_teacher(lessons[2], teachers[2]).unwrap();
    repo.link_teacher(lessons[5], teachers[2]).unwrap();
    repo.link_teacher(lessons[7], teachers[1]).unwrap();
    repo.link_teacher(lessons[7], teachers[2]).unwrap();
    repo.link_teacher(lessons[7], teachers[3]).unwrap();
    repo.link_teacher(lessons[8], teachers[2]).unwrap();

    repo.enroll_student(lessons[0], students[0], false).unwrap();
    repo.enroll_student(lessons[0], students[1], true).unwrap();
    repo.enroll_student(lessons[0], students[2], false).unwrap();
    repo.enroll_student(lessons[7], students[0], true).unwrap();
    repo.enroll_student(lessons[7], students[1], true).unwrap();
    repo.enroll_student(lessons[7], students[3], false).unwrap();

    repo
}

fn ids(records: &[lessons_rust::models::LessonRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id.value()).collect()
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    let result = health_check(&repo).await;

    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_fetch_first_page_unfiltered() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    let records = get_lessons(&repo, &config, &LessonsQuery::default())
        .await
        .unwrap();

    assert_eq!(ids(&records), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_fetch_second_page() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    let query = LessonsQuery {
        page: Some("2".to_string()),
        ..Default::default()
    };
    let records = get_lessons(&repo, &config, &query).await.unwrap();

    assert_eq!(ids(&records), vec![6, 7, 8, 9]);
}

#[tokio::test]
async fn test_combined_filters_single_record() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    // Lessons 1 and 8 survive the filters; page 2 with one lesson per page
    // leaves only the recital.
    let query = LessonsQuery {
        date: Some("2019-05-15,2019-09-03".to_string()),
        status: Some("1".to_string()),
        teacher_ids: Some("1,2,4".to_string()),
        students_count: Some("3".to_string()),
        page: Some("2".to_string()),
        lessons_per_page: Some("1".to_string()),
    };
    let records = get_lessons(&repo, &config, &query).await.unwrap();

    assert_eq!(records.len(), 1);
    let recital = &records[0];
    assert_eq!(recital.id.value(), 8);
    assert_eq!(recital.date, date(2019, 8, 26));
    assert_eq!(recital.title.as_deref(), Some("Recital"));
    assert_eq!(recital.status, 1);
    assert_eq!(recital.visit_count, 2);

    let student_ids: Vec<i64> = recital.students.iter().map(|s| s.id.value()).collect();
    let visits: Vec<bool> = recital.students.iter().map(|s| s.visit).collect();
    assert_eq!(student_ids, vec![1, 2, 4]);
    assert_eq!(visits, vec![true, true, false]);

    let teacher_ids: Vec<i64> = recital.teachers.iter().map(|t| t.id.value()).collect();
    assert_eq!(teacher_ids, vec![2, 3, 4]);
    assert_eq!(recital.teachers[0].name, "Brian Holt");
}

#[tokio::test]
async fn test_teacher_filter_skips_unassigned_lessons() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    // Every status-0 lesson has no teacher, so no teacher list overlaps.
    let query = LessonsQuery {
        status: Some("0".to_string()),
        teacher_ids: Some("1,2,3,4".to_string()),
        ..Default::default()
    };
    let records = get_lessons(&repo, &config, &query).await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_roster_size_counts_absentees() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    let query = LessonsQuery {
        students_count: Some("3".to_string()),
        ..Default::default()
    };
    let records = get_lessons(&repo, &config, &query).await.unwrap();

    // Both rosters have three students even though attendance differs.
    assert_eq!(ids(&records), vec![1, 8]);
    assert_eq!(records[0].visit_count, 1);
    assert_eq!(records[1].visit_count, 2);
}

#[tokio::test]
async fn test_date_range_is_order_independent() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    let forward = LessonsQuery {
        date: Some("2019-05-15,2019-09-03".to_string()),
        ..Default::default()
    };
    let backward = LessonsQuery {
        date: Some("2019-09-03,2019-05-15".to_string()),
        ..Default::default()
    };

    let a = get_lessons(&repo, &config, &forward).await.unwrap();
    let b = get_lessons(&repo, &config, &backward).await.unwrap();

    assert_eq!(ids(&a), vec![1, 2, 3, 5, 6]);
    assert_eq!(ids(&a), ids(&b));
}

#[tokio::test]
async fn test_add_lessons_round_trip() {
    let repo = LocalRepository::new();
    let config = LessonsConfig::default();
    let teacher = repo.add_teacher("Alice Carter").unwrap();

    // October 5th 2023 is a Thursday; the first Monday on or after it is
    // October 9th.
    let body = json!({
        "title": "Piano",
        "teacherIds": [teacher.value()],
        "days": [1],
        "firstDate": "2023-10-05",
        "lessonsCount": 4
    });
    let created = add_lessons(&repo, &config, &body).await.unwrap();
    assert_eq!(created.len(), 4);

    let query = LessonsQuery {
        date: Some("2023-10-09,2023-10-30".to_string()),
        ..Default::default()
    };
    let records = get_lessons(&repo, &config, &query).await.unwrap();

    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2023, 10, 9),
            date(2023, 10, 16),
            date(2023, 10, 23),
            date(2023, 10, 30),
        ]
    );
    assert!(records.iter().all(|r| r.status == 0));
    assert!(records.iter().all(|r| r.title.as_deref() == Some("Piano")));
    assert!(records
        .iter()
        .all(|r| r.teachers.len() == 1 && r.teachers[0].id == teacher));
}

#[tokio::test]
async fn test_add_lessons_caps_unbounded_series() {
    let repo = LocalRepository::new();
    let config = LessonsConfig::default();

    // Daily recurrence with neither count nor end date runs a year ahead,
    // so the series cap decides the length.
    let body = json!({
        "days": [0, 1, 2, 3, 4, 5, 6],
        "firstDate": "2024-01-01"
    });
    let created = add_lessons(&repo, &config, &body).await.unwrap();

    assert_eq!(created.len(), 300);
    assert_eq!(repo.lesson_count().unwrap(), 300);

    let on_last_day = LessonsQuery {
        date: Some("2024-10-26".to_string()),
        ..Default::default()
    };
    let records = get_lessons(&repo, &config, &on_last_day).await.unwrap();
    assert_eq!(records.len(), 1);

    let past_the_cap = LessonsQuery {
        date: Some("2024-10-27".to_string()),
        ..Default::default()
    };
    let records = get_lessons(&repo, &config, &past_the_cap).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_add_lessons_respects_last_date() {
    let repo = LocalRepository::new();
    let config = LessonsConfig::default();

    let body = json!({
        "days": [2, 4],
        "firstDate": "2023-10-03",
        "lastDate": "2023-10-12"
    });
    let created = add_lessons(&repo, &config, &body).await.unwrap();
    assert_eq!(created.len(), 4);

    let records = get_lessons(&repo, &config, &LessonsQuery::default())
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2023, 10, 3),
            date(2023, 10, 5),
            date(2023, 10, 10),
            date(2023, 10, 12),
        ]
    );
}

#[tokio::test]
async fn test_add_lessons_unknown_teacher_is_atomic() {
    let repo = LocalRepository::new();
    let config = LessonsConfig::default();

    let body = json!({
        "teacherIds": [42],
        "days": [3],
        "firstDate": "2023-10-04",
        "lessonsCount": 5
    });
    let err = add_lessons(&repo, &config, &body).await.unwrap_err();

    match err {
        ServiceError::Repository(e) => {
            assert!(e.to_string().contains("foreign key constraint"))
        }
        other => panic!("expected repository error, got {other:?}"),
    }
    assert_eq!(repo.lesson_count().unwrap(), 0);
}

#[tokio::test]
async fn test_add_lessons_rejects_malformed_body() {
    let repo = LocalRepository::new();
    let config = LessonsConfig::default();

    let body = json!({
        "days": [7],
        "firstDate": "2023-10-04"
    });
    let err = add_lessons(&repo, &config, &body).await.unwrap_err();

    match err {
        ServiceError::Invalid(e) => {
            assert_eq!(e.to_string(), "\"days\" missing or invalid")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(repo.lesson_count().unwrap(), 0);
}

#[tokio::test]
async fn test_get_lessons_rejects_malformed_page() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    let query = LessonsQuery {
        page: Some("2.5".to_string()),
        ..Default::default()
    };
    let err = get_lessons(&repo, &config, &query).await.unwrap_err();

    match err {
        ServiceError::Invalid(e) => {
            assert_eq!(e.to_string(), "\"page\" must be positive integer")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_lessons_rejects_overflowing_page() {
    let repo = seeded_repository();
    let config = LessonsConfig::default();

    // A page number whose offset exceeds i64 is refused, not wrapped.
    let query = LessonsQuery {
        page: Some(i64::MAX.to_string()),
        ..Default::default()
    };
    let err = get_lessons(&repo, &config, &query).await.unwrap_err();

    match err {
        ServiceError::Invalid(e) => {
            assert_eq!(e.to_string(), "\"page\" must be positive integer")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_page_size_from_config() {
    let repo = seeded_repository();
    let config = LessonsConfig {
        lessons_per_page: 3,
        max_lessons: 300,
    };

    let records = get_lessons(&repo, &config, &LessonsQuery::default())
        .await
        .unwrap();
    assert_eq!(ids(&records), vec![1, 2, 3]);
}
