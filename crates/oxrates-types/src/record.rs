//! Record envelope.

use serde_json::Value;

use crate::DateSlice;

/// The decoded rates payload for one day, tagged with the slice it came from.
///
/// `data` is passed through exactly as the API returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    /// The slice whose request produced this record.
    pub slice: DateSlice,
    /// Raw JSON response body.
    pub data: Value,
}

impl RateRecord {
    /// Creates a new record.
    #[must_use]
    pub const fn new(slice: DateSlice, data: Value) -> Self {
        Self { slice, data }
    }

    /// Returns the record's cursor value (`YYYY-MM-DD`).
    #[must_use]
    pub fn cursor_value(&self) -> String {
        self.slice.cursor_value()
    }
}
