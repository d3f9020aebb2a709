//! The capability set of an HTTP-backed stream.

use bytes::Bytes;
use oxrates_types::{CURSOR_FIELD, DateSlice, SyncState};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::HttpRequest;

/// A resource read as one HTTP request per slice.
///
/// Implementors describe *what* to request; the reader in this crate decides
/// *when*, and owns transport concerns such as retries.
pub trait HttpStream: Send + Sync + std::fmt::Debug {
    /// Stream name as reported in the catalog and on every record.
    fn name(&self) -> &str;

    /// Field used to track sync progress.
    fn cursor_field(&self) -> &str {
        CURSOR_FIELD
    }

    /// Computes the slices still to be read, given the prior state.
    fn stream_slices(&self, state: &SyncState) -> Vec<DateSlice>;

    /// Path of the request for `slice`, relative to the API base URL.
    fn path(&self, slice: &DateSlice) -> String;

    /// Query parameters for `slice`.
    fn request_params(&self, slice: &DateSlice) -> BTreeMap<String, String>;

    /// Headers for `slice`.
    fn request_headers(&self, slice: &DateSlice) -> BTreeMap<String, String>;

    /// Token for the next page of `body`, if the response was partial.
    fn next_page_token(&self, _body: &Bytes) -> Option<Value> {
        None
    }

    /// Decodes a response body into records.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    fn parse_response(&self, body: &Bytes) -> Result<Vec<Value>, serde_json::Error>;

    /// Assembles the full request for `slice`.
    fn request(&self, slice: &DateSlice) -> HttpRequest {
        HttpRequest {
            path: self.path(slice),
            params: self.request_params(slice),
            headers: self.request_headers(slice),
        }
    }
}
