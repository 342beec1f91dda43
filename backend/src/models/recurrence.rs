//! Weekday recurrence math.
//!
//! A recurrence takes a set of weekdays and a start date and produces the
//! dates on those weekdays, in calendar order, starting from the first
//! selected weekday on or after the start date. Internally this is a shift
//! cycle: an ordered list of day deltas, one per selected weekday, that sums
//! to exactly 7 and is applied cyclically to the adjusted start date.

use chrono::{Datelike, Days, NaiveDate};

/// Expansion of a weekday set into a cyclic schedule.
///
/// Weekdays use the Sunday = 0 through Saturday = 6 convention. Construction
/// normalizes the set (deduplicated, ascending) and advances the start date
/// to the first selected weekday on or after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    days: Vec<u32>,
    first_date: NaiveDate,
    day_shifts: Vec<u32>,
}

impl Recurrence {
    /// Builds the recurrence for `days` starting no earlier than `start_date`.
    ///
    /// Fails when the set is empty or contains a value outside `0..=6`.
    pub fn new(days: &[u32], start_date: NaiveDate) -> Result<Self, String> {
        let mut sorted = days.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        if sorted.is_empty() {
            return Err("weekday set must not be empty".to_string());
        }
        if sorted.iter().any(|d| *d > 6) {
            return Err("weekdays must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        let first_dow = start_date.weekday().num_days_from_sunday();
        let (offset, start_index) = match sorted.iter().position(|d| *d >= first_dow) {
            Some(i) => (sorted[i] - first_dow, i),
            // All selected weekdays fall earlier in the week; wrap to the next one.
            None => (7 - first_dow + sorted[0], 0),
        };
        let first_date = start_date + Days::new(u64::from(offset));

        let n = sorted.len();
        let mut day_shifts: Vec<u32> = (0..n)
            .map(|k| {
                let delta = sorted[(k + 1) % n] as i32 - sorted[k] as i32;
                if delta <= 0 {
                    (delta + 7) as u32
                } else {
                    delta as u32
                }
            })
            .collect();
        // Align the cycle with the adjusted start date.
        day_shifts.rotate_left(start_index);

        Ok(Self {
            days: sorted,
            first_date,
            day_shifts,
        })
    }

    /// Normalized weekday set, ascending.
    pub fn days(&self) -> &[u32] {
        &self.days
    }

    /// Start date advanced to the first selected weekday.
    pub fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    /// Day deltas applied cyclically from the adjusted start date.
    pub fn day_shifts(&self) -> &[u32] {
        &self.day_shifts
    }

    pub fn cycle_len(&self) -> usize {
        self.day_shifts.len()
    }

    /// All occurrence dates in order, starting at the adjusted start date.
    ///
    /// The iterator is unbounded; callers cut it with a count or an end date.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut index = 0usize;
        std::iter::successors(Some(self.first_date), move |date| {
            let shift = self.day_shifts[index % self.day_shifts.len()];
            index += 1;
            date.checked_add_days(Days::new(u64::from(shift)))
        })
    }
}
