//! Rust library for syncing historical exchange rates from Open Exchange Rates.
//!
//! This is a facade crate that re-exports functionality from the oxrates
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use oxrates_lib::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config: ConnectorConfig = serde_json::from_str(
//!         r#"{"app_id": "...", "start_date": "2024-01-01", "base": "EUR"}"#,
//!     )?;
//!     let source = OpenExchangeRates::new(config);
//!     let client = ApiClient::with_defaults()?;
//!
//!     let status = source.check(&client).await;
//!     if !status.ok {
//!         return Err(status.message.unwrap_or_default().into());
//!     }
//!
//!     let rates = source.rates();
//!     let mut state = SyncState::default();
//!     let mut records = std::pin::pin!(record_stream(&client, &rates, state));
//!     while let Some(record) = records.next().await {
//!         let record = record?;
//!         state.observe(&record.slice);
//!         println!("{}: {}", record.cursor_value(), record.data["rates"]["USD"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/oxrates/oxrates/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use oxrates_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use oxrates_fetch::{
    ApiClient, ApiResponse, BASE_URL, ClientConfig, FetchError, HttpRequest, HttpStream,
    record_stream, slice_records,
};

// Re-export the source
#[cfg(feature = "source")]
pub use oxrates_source::{
    Catalog, ConnectionStatus, HistoricalRates, OpenExchangeRates, QUOTA_EXCEEDED, STREAM_NAME,
    StreamDescriptor, SyncMode, check_connection, connection_specification, evaluate_usage,
    rates_schema,
};

/// Prelude module for convenient imports.
///
/// ```
/// use oxrates_lib::prelude::*;
/// ```
pub mod prelude {
    pub use oxrates_types::{
        Clock, ConnectorConfig, CurrencyCode, DateSlice, FixedClock, OxratesError, RateRecord,
        SyncState, SystemClock,
    };

    #[cfg(feature = "fetch")]
    pub use oxrates_fetch::{ApiClient, ClientConfig, HttpStream, record_stream, slice_records};

    #[cfg(feature = "source")]
    pub use oxrates_source::{ConnectionStatus, HistoricalRates, OpenExchangeRates};
}
