//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the HTTP
//! transport and the repository. Services compile raw requests into
//! validated values and orchestrate storage calls.

pub mod lessons;

pub use lessons::{add_lessons, get_lessons, health_check, ServiceError};
