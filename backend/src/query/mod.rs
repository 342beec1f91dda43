//! Request compilation and SQL plan rendering.
//!
//! Requests compile into immutable normalized values ([`LessonSeries`],
//! [`LessonFilter`]) which the plan builders render into a single
//! positionally-parameterized statement each. Placeholders are allocated in a
//! fixed clause order, so a given request always produces the same statement
//! text and the same parameter list.

pub mod error;
pub mod filter;
pub mod insert;
pub mod plan;
pub mod select;

pub use error::InvalidInput;
pub use filter::{CountFilter, DateFilter, LessonFilter, LessonsQuery};
pub use insert::{insert_plan, LessonSeries};
pub use plan::{ParamBinder, Plan, PlanParam};
pub use select::select_plan;

use chrono::NaiveDate;

/// Parses an ISO `YYYY-MM-DD` date.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
