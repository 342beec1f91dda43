//! # Lessons Rust Backend
//!
//! Recurring-lesson scheduling service on a relational store.
//!
//! This crate schedules recurring lessons from a weekday pattern and retrieves
//! them under ad-hoc filters with pagination. The two load-bearing pieces are
//! the recurrence calculator, which turns a weekday set and a start date into a
//! cyclic sequence of occurrence dates, and the plan builders, which compile
//! validated request criteria into a single parameterized SQL statement each.
//! The backend exposes a REST API via Axum.
//!
//! ## Features
//!
//! - **Recurrence Math**: weekday-set expansion into bounded occurrence dates
//! - **Plan Building**: dynamic, positionally-parameterized insert and
//!   retrieval statements compiled from normalized request values
//! - **Filtering**: date, status, teacher membership, roster size, pagination
//! - **Persistence**: pluggable repository with in-memory and Postgres backends
//! - **HTTP API**: RESTful endpoints for lesson creation and retrieval
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and the public type surface
//! - [`models`]: domain records and the recurrence calculator
//! - [`query`]: request compilation and SQL plan rendering
//! - [`db`]: repository pattern, backends, and persistence configuration
//! - [`services`]: request-level orchestration over a repository
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;

pub mod db;
pub mod models;
pub mod query;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
