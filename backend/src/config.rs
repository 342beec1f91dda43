//! Service-level configuration.
//!
//! Pagination and generation limits are read once at startup and passed
//! explicitly into the request compilers. The compilers themselves never
//! touch the process environment.

use std::env;

/// Limits applied when compiling lesson requests.
///
/// `lessons_per_page` is the page size used when a retrieval request does not
/// specify one. `max_lessons` caps how many occurrences a single insert may
/// generate when the request bounds the series by end date only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonsConfig {
    pub lessons_per_page: i64,
    pub max_lessons: i64,
}

impl Default for LessonsConfig {
    fn default() -> Self {
        Self {
            lessons_per_page: 5,
            max_lessons: 300,
        }
    }
}

impl LessonsConfig {
    /// Loads limits from `LESSONS_PER_PAGE` and `MAX_LESSONS`.
    ///
    /// Unset, unparseable, or non-positive values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lessons_per_page: env_positive("LESSONS_PER_PAGE").unwrap_or(defaults.lessons_per_page),
            max_lessons: env_positive("MAX_LESSONS").unwrap_or(defaults.max_lessons),
        }
    }
}

fn env_positive(key: &str) -> Option<i64> {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = LessonsConfig::default();
        assert_eq!(config.lessons_per_page, 5);
        assert_eq!(config.max_lessons, 300);
    }
}
