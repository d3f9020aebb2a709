//! Open Exchange Rates source for oxrates.
//!
//! - [`OpenExchangeRates`] - The source, bound to its configuration
//! - [`HistoricalRates`] - Daily historical rates stream
//! - [`check_connection`] - Credential and quota check
//! - [`Catalog`] - Streams offered, with their schemas

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/oxrates/oxrates/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod check;
mod rates;
mod source;

pub use catalog::{Catalog, StreamDescriptor, SyncMode, connection_specification, rates_schema};
pub use check::{ConnectionStatus, QUOTA_EXCEEDED, USAGE_PATH, check_connection, evaluate_usage};
pub use rates::{HistoricalRates, STREAM_NAME};
pub use source::OpenExchangeRates;
