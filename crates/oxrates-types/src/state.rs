//! Resumable sync state.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{DateSlice, parse_date};

/// The latest day a sync has processed.
///
/// Serializes as `{"timestamp": "YYYY-MM-DD"}`, or `{}` before any day has
/// been processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// Cursor value: the maximum slice date seen.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date"
    )]
    pub timestamp: Option<NaiveDate>,
}

impl SyncState {
    /// Creates a state positioned at the given day.
    #[must_use]
    pub const fn at(timestamp: NaiveDate) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }

    /// Returns true if no day has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.timestamp.is_none()
    }

    /// Returns the day a sync should resume from.
    ///
    /// The cursor takes precedence; `start_date` is used only without one.
    #[must_use]
    pub fn resume_date(&self, start_date: NaiveDate) -> NaiveDate {
        self.timestamp.unwrap_or(start_date)
    }

    /// Advances the cursor to `slice` if it is later than the current value.
    pub fn observe(&mut self, slice: &DateSlice) {
        if self.timestamp.is_none_or(|current| slice.timestamp > current) {
            self.timestamp = Some(slice.timestamp);
        }
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|value| parse_date("timestamp", &value))
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resume_prefers_cursor() {
        let start = date(2022, 1, 1);
        assert_eq!(SyncState::default().resume_date(start), start);
        assert_eq!(
            SyncState::at(date(2022, 3, 5)).resume_date(start),
            date(2022, 3, 5)
        );
    }

    #[test]
    fn test_observe_keeps_maximum() {
        let mut state = SyncState::default();
        state.observe(&DateSlice::new(date(2022, 1, 2)));
        state.observe(&DateSlice::new(date(2022, 1, 1)));
        assert_eq!(state.timestamp, Some(date(2022, 1, 2)));

        state.observe(&DateSlice::new(date(2022, 1, 3)));
        assert_eq!(state.timestamp, Some(date(2022, 1, 3)));
    }

    #[test]
    fn test_state_json_shape() {
        let json = serde_json::to_string(&SyncState::at(date(2022, 1, 3))).unwrap();
        assert_eq!(json, r#"{"timestamp":"2022-01-03"}"#);
        assert_eq!(serde_json::to_string(&SyncState::default()).unwrap(), "{}");
    }

    #[test]
    fn test_state_parses_datetime_cursor() {
        let state: SyncState =
            serde_json::from_str(r#"{"timestamp": "2022-01-03T00:00:00Z"}"#).unwrap();
        assert_eq!(state.timestamp, Some(date(2022, 1, 3)));

        let empty: SyncState = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        assert!(serde_json::from_str::<SyncState>(r#"{"timestamp": "soon"}"#).is_err());
    }
}
