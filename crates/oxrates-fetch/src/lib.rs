//! HTTP client and stream reader for the oxrates exchange rate connector.
//!
//! This crate provides the generic data pipeline around a stream:
//!
//! - [`ApiClient`] - HTTP client with connection pooling and retries
//! - [`HttpRequest`] - Path, query parameters and headers of one request
//! - [`HttpStream`] - What a stream must describe for each slice
//! - [`record_stream`] - Sequential async record reader
//! - [`slice_records`] - The same reader over precomputed slices

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/oxrates/oxrates/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod http_stream;
mod reader;
mod request;

pub use client::{ApiClient, ApiResponse, BASE_URL, ClientConfig, FetchError};
pub use http_stream::HttpStream;
pub use reader::{record_stream, slice_records};
pub use request::HttpRequest;
