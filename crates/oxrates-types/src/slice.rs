//! Daily date slices and day iteration.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Name of the field that carries sync progress.
pub const CURSOR_FIELD: &str = "timestamp";

/// Wire format for dates in paths, slices and state.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One unit of work: a single calendar day's request.
///
/// Serializes as `{"timestamp": "YYYY-MM-DD"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateSlice {
    /// The day this slice covers.
    pub timestamp: NaiveDate,
}

impl DateSlice {
    /// Creates a slice for the given day.
    #[must_use]
    pub const fn new(timestamp: NaiveDate) -> Self {
        Self { timestamp }
    }

    /// Returns the slice's cursor value formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn cursor_value(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for DateSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.timestamp.format(DATE_FORMAT))
    }
}

/// Iterator over calendar days in `[start, end)`.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: NaiveDate,
    end: NaiveDate,
}

impl DayIterator {
    /// Creates an iterator that yields `start`, `start + 1`, ... while the
    /// day is strictly before `end`.
    #[must_use]
    pub const fn until(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            current: start,
            end,
        }
    }
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }

        let result = self.current;
        // Past the last representable day there is nothing left to yield.
        self.current = self
            .current
            .checked_add_days(Days::new(1))
            .unwrap_or(self.end);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current >= self.end {
            return (0, Some(0));
        }
        let days = (self.end - self.current).num_days() as usize;
        (days, Some(days))
    }
}

impl ExactSizeIterator for DayIterator {}

/// Returns one slice per day from `start` up to, not including, `today`.
///
/// A `start` on or after `today` yields no slices.
#[must_use]
pub fn chunk_date_range(start: NaiveDate, today: NaiveDate) -> Vec<DateSlice> {
    DayIterator::until(start, today).map(DateSlice::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_chunk_excludes_today() {
        let slices = chunk_date_range(date(2022, 1, 1), date(2022, 1, 4));
        let days: Vec<_> = slices.iter().map(DateSlice::cursor_value).collect();
        assert_eq!(days, ["2022-01-01", "2022-01-02", "2022-01-03"]);
    }

    #[test]
    fn test_chunk_start_today_or_later_is_empty() {
        assert!(chunk_date_range(date(2022, 1, 4), date(2022, 1, 4)).is_empty());
        assert!(chunk_date_range(date(2022, 2, 1), date(2022, 1, 4)).is_empty());
    }

    #[test]
    fn test_chunk_crosses_month_and_leap_day() {
        let slices = chunk_date_range(date(2024, 2, 27), date(2024, 3, 2));
        let days: Vec<_> = slices.iter().map(ToString::to_string).collect();
        assert_eq!(
            days,
            ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn test_day_iterator_size_hint() {
        let iter = DayIterator::until(date(2021, 12, 30), date(2022, 1, 2));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.last(), Some(date(2022, 1, 1)));
    }

    #[test]
    fn test_slice_serializes_as_timestamp_object() {
        let slice = DateSlice::new(date(2022, 1, 3));
        let json = serde_json::to_value(slice).unwrap();
        assert_eq!(json, serde_json::json!({ "timestamp": "2022-01-03" }));
    }
}
