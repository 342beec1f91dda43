//! Repository implementations module.
//!
//! This module contains different implementations of the `LessonRepository` trait:
//! - `postgres`: PostgreSQL implementation backed by sqlx
//! - `local`: In-memory implementation for unit testing and local development
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PostgresConfig, PostgresRepository};
