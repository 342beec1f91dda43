//! Tests for db::repository::error module.

use lessons_rust::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("create_lessons");
    assert_eq!(ctx.operation, Some("create_lessons".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_error_context_with_entity() {
    let ctx = ErrorContext::new("op").with_entity("lesson");
    assert_eq!(ctx.entity, Some("lesson".to_string()));
}

#[test]
fn test_error_context_with_details() {
    let ctx = ErrorContext::new("op").with_details("no row with id 42");
    assert_eq!(ctx.details, Some("no row with id 42".to_string()));
}

#[test]
fn test_error_context_retryable() {
    let ctx = ErrorContext::new("op").retryable();
    assert!(ctx.retryable);
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("create_lessons")
        .with_entity("teacher")
        .with_details("timeout occurred")
        .retryable();

    assert_eq!(ctx.operation, Some("create_lessons".to_string()));
    assert_eq!(ctx.entity, Some("teacher".to_string()));
    assert_eq!(ctx.details, Some("timeout occurred".to_string()));
    assert!(ctx.retryable);
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("fetch_lessons")
        .with_entity("lesson")
        .with_details("decode failed");

    let display = format!("{}", ctx);
    assert!(display.contains("operation=fetch_lessons"));
    assert!(display.contains("entity=lesson"));
    assert!(display.contains("details=decode failed"));
}

#[test]
fn test_connection_error_is_retryable() {
    let err = RepositoryError::connection("connection refused");
    assert!(err.is_retryable());
    assert!(err.to_string().contains("Connection error"));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_timeout_error_is_retryable() {
    let err = RepositoryError::timeout("pool exhausted");
    assert!(err.is_retryable());
    assert!(err.to_string().contains("Timeout error"));
}

#[test]
fn test_query_error_not_retryable_by_default() {
    let err = RepositoryError::query("syntax error at or near \"SELEC\"");
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("Query error"));
}

#[test]
fn test_validation_and_configuration_never_retry() {
    assert!(!RepositoryError::validation("bad row").is_retryable());
    assert!(!RepositoryError::configuration("missing DATABASE_URL").is_retryable());
    assert!(!RepositoryError::internal("unreachable state").is_retryable());
}

#[test]
fn test_query_error_with_retryable_context() {
    let err = RepositoryError::query_with_context(
        "deadlock detected",
        ErrorContext::new("create_lessons").retryable(),
    );
    assert!(err.is_retryable());
}

#[test]
fn test_connection_with_context_keeps_retryable() {
    let err = RepositoryError::connection_with_context(
        "server closed the connection",
        ErrorContext::new("fetch_lessons").with_entity("lesson"),
    );
    assert!(err.is_retryable());
    assert_eq!(err.context().operation.as_deref(), Some("fetch_lessons"));
}

#[test]
fn test_with_operation_sets_context() {
    let err = RepositoryError::query("duplicate key").with_operation("create_lessons");
    assert_eq!(err.context().operation.as_deref(), Some("create_lessons"));
    assert!(err.to_string().contains("operation=create_lessons"));
}

#[test]
fn test_from_string_conversions() {
    let err: RepositoryError = "something broke".into();
    assert!(matches!(err, RepositoryError::InternalError { .. }));

    let err: RepositoryError = String::from("something else broke").into();
    assert!(err.to_string().contains("something else broke"));
}

#[test]
fn test_error_context_default_is_empty() {
    let ctx = ErrorContext::default();
    assert!(ctx.operation.is_none());
    assert!(ctx.entity.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}
