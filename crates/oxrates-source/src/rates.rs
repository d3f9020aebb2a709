//! The historical rates stream.

use bytes::Bytes;
use chrono::NaiveDate;
use oxrates_fetch::HttpStream;
use oxrates_types::{
    Clock, ConnectorConfig, CurrencyCode, DateSlice, SyncState, SystemClock, chunk_date_range,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the stream in the catalog.
pub const STREAM_NAME: &str = "open_exchange_rates";

/// Daily historical rates, one request per calendar day.
#[derive(Clone)]
pub struct HistoricalRates {
    base: Option<CurrencyCode>,
    start_date: NaiveDate,
    app_id: String,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for HistoricalRates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoricalRates")
            .field("base", &self.base)
            .field("start_date", &self.start_date)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl HistoricalRates {
    /// Creates the stream, reading "today" from the system clock.
    #[must_use]
    pub fn new(config: &ConnectorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates the stream with an explicit clock.
    #[must_use]
    pub fn with_clock(config: &ConnectorConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            base: config.base().cloned(),
            start_date: config.start_date(),
            app_id: config.app_id().to_string(),
            clock,
        }
    }
}

impl HttpStream for HistoricalRates {
    fn name(&self) -> &str {
        STREAM_NAME
    }

    fn stream_slices(&self, state: &SyncState) -> Vec<DateSlice> {
        chunk_date_range(state.resume_date(self.start_date), self.clock.today())
    }

    fn path(&self, slice: &DateSlice) -> String {
        format!("historical/{slice}.json")
    }

    fn request_params(&self, _slice: &DateSlice) -> BTreeMap<String, String> {
        self.base
            .iter()
            .map(|base| ("base".to_string(), base.to_string()))
            .collect()
    }

    fn request_headers(&self, _slice: &DateSlice) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Authorization".to_string(), format!("Token {}", self.app_id)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ])
    }

    fn parse_response(&self, body: &Bytes) -> Result<Vec<Value>, serde_json::Error> {
        Ok(vec![serde_json::from_slice(body)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrates_types::FixedClock;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stream(base: Option<&str>, today: NaiveDate) -> HistoricalRates {
        let base = base.map(CurrencyCode::new);
        let config = ConnectorConfig::new("k", date(2022, 1, 1), base).unwrap();
        HistoricalRates::with_clock(&config, Arc::new(FixedClock(today)))
    }

    fn days(slices: &[DateSlice]) -> Vec<String> {
        slices.iter().map(DateSlice::cursor_value).collect()
    }

    #[test]
    fn test_slices_from_start_date() {
        let rates = stream(None, date(2022, 1, 4));
        let slices = rates.stream_slices(&SyncState::default());
        assert_eq!(days(&slices), ["2022-01-01", "2022-01-02", "2022-01-03"]);
    }

    #[test]
    fn test_slices_resume_from_cursor() {
        let rates = stream(None, date(2022, 1, 6));
        let slices = rates.stream_slices(&SyncState::at(date(2022, 1, 4)));
        assert_eq!(days(&slices), ["2022-01-04", "2022-01-05"]);
    }

    #[test]
    fn test_slices_empty_when_start_is_today() {
        let rates = stream(None, date(2022, 1, 1));
        assert!(rates.stream_slices(&SyncState::default()).is_empty());
    }

    #[test]
    fn test_path() {
        let rates = stream(None, date(2022, 1, 4));
        let slice = DateSlice::new(date(2022, 1, 2));
        assert_eq!(rates.path(&slice), "historical/2022-01-02.json");
    }

    #[test]
    fn test_params_include_base_only_when_configured() {
        let slice = DateSlice::new(date(2022, 1, 2));

        let without = stream(None, date(2022, 1, 4));
        assert!(without.request_params(&slice).is_empty());

        let with = stream(Some("EUR"), date(2022, 1, 4));
        let params = with.request_params(&slice);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("base").map(String::as_str), Some("EUR"));
    }

    #[test]
    fn test_params_send_configured_base_verbatim() {
        let config: ConnectorConfig =
            serde_json::from_str(r#"{"app_id": "k", "start_date": "2022-01-01", "base": "eur"}"#)
                .unwrap();
        let rates = HistoricalRates::with_clock(&config, Arc::new(FixedClock(date(2022, 1, 4))));

        let params = rates.request_params(&DateSlice::new(date(2022, 1, 2)));
        assert_eq!(params.get("base").map(String::as_str), Some("eur"));
    }

    #[test]
    fn test_headers() {
        let rates = stream(None, date(2022, 1, 4));
        let headers = rates.request_headers(&DateSlice::new(date(2022, 1, 2)));
        assert_eq!(headers["Authorization"], "Token k");
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_parse_response_passes_body_through() {
        let rates = stream(None, date(2022, 1, 4));
        let body = json!({
            "disclaimer": "Usage subject to terms",
            "timestamp": 1_641_081_599,
            "base": "USD",
            "rates": {"EUR": 0.879, "GBP": 0.739}
        });
        let bytes = Bytes::from(serde_json::to_vec(&body).unwrap());

        let records = rates.parse_response(&bytes).unwrap();
        assert_eq!(records, vec![body]);
        assert!(rates.next_page_token(&bytes).is_none());
    }

    #[test]
    fn test_parse_response_rejects_invalid_json() {
        let rates = stream(None, date(2022, 1, 4));
        assert!(rates.parse_response(&Bytes::from_static(b"<html>")).is_err());
    }
}
