//! Core types for the oxrates exchange rate connector.
//!
//! This crate provides the fundamental data structures used throughout oxrates:
//!
//! - [`ConnectorConfig`] - Validated connector configuration
//! - [`CurrencyCode`] - Base currency, kept as configured
//! - [`DateSlice`] - One calendar day of work, keyed by the `timestamp` cursor
//! - [`DayIterator`] - Iterator over calendar days in a half-open range
//! - [`SyncState`] - Resumable sync position
//! - [`RateRecord`] - A raw rates payload tagged with its slice
//! - [`Clock`] - Source of "today" for slice computation

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/oxrates/oxrates/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod error;
mod record;
mod slice;
mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConnectorConfig, CurrencyCode, RawConfig, parse_date};
pub use error::{ConfigError, OxratesError};
pub use record::RateRecord;
pub use slice::{CURSOR_FIELD, DATE_FORMAT, DateSlice, DayIterator, chunk_date_range};
pub use state::SyncState;
