//! Sequential record reader.

use futures::future;
use futures::stream::{self, Stream, StreamExt};
use oxrates_types::{DateSlice, OxratesError, RateRecord, SyncState};

use crate::{ApiClient, FetchError, HttpStream};

impl From<FetchError> for OxratesError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { url, status, body } => Self::Status { url, status, body },
            other => Self::Http(other.to_string()),
        }
    }
}

/// Creates an async stream of records for `stream`, resuming from `state`.
///
/// Slices are computed once, up front. Requests are issued strictly in slice
/// order and only one is in flight at a time; a slice's records are yielded
/// before the next slice is requested. Dropping the returned stream stops
/// further requests.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `stream` - The stream describing each slice's request
/// * `state` - Prior sync state; empty for a full read
///
/// # Returns
///
/// An async stream of records, in slice order. A failed slice yields a
/// single error item and ends the stream; later slices are not requested.
pub fn record_stream<'a, S>(
    client: &'a ApiClient,
    stream: &'a S,
    state: SyncState,
) -> impl Stream<Item = Result<RateRecord, OxratesError>> + 'a
where
    S: HttpStream + ?Sized,
{
    slice_records(client, stream, stream.stream_slices(&state))
}

/// Like [`record_stream`], for slices the caller has already computed.
pub fn slice_records<'a, S>(
    client: &'a ApiClient,
    stream: &'a S,
    slices: Vec<DateSlice>,
) -> impl Stream<Item = Result<RateRecord, OxratesError>> + 'a
where
    S: HttpStream + ?Sized,
{
    tracing::debug!(
        stream = stream.name(),
        slices = slices.len(),
        first = ?slices.first().map(DateSlice::cursor_value),
        "computed slices"
    );

    flatten_records(stream::iter(slices).then(move |slice| read_slice(client, stream, slice)))
}

/// Fetches and decodes a single slice.
async fn read_slice<S>(
    client: &ApiClient,
    stream: &S,
    slice: DateSlice,
) -> Result<Vec<RateRecord>, OxratesError>
where
    S: HttpStream + ?Sized,
{
    let request = stream.request(&slice);
    tracing::debug!(stream = stream.name(), %slice, path = %request.path, "requesting slice");

    let body = client.send(&request).await?;
    if stream.next_page_token(&body).is_some() {
        tracing::warn!(stream = stream.name(), %slice, "ignoring next page token");
    }

    let records: Vec<RateRecord> = stream
        .parse_response(&body)?
        .into_iter()
        .map(|data| RateRecord::new(slice, data))
        .collect();
    tracing::debug!(stream = stream.name(), %slice, records = records.len(), "slice read");
    Ok(records)
}

/// Flattens a per-slice record stream into individual records, ending after
/// the first error.
fn flatten_records(
    slice_stream: impl Stream<Item = Result<Vec<RateRecord>, OxratesError>>,
) -> impl Stream<Item = Result<RateRecord, OxratesError>> {
    slice_stream
        .scan(false, |failed, result| {
            if *failed {
                return future::ready(None);
            }
            *failed = result.is_err();
            future::ready(Some(result))
        })
        .flat_map(|result| match result {
            Ok(records) => stream::iter(records.into_iter().map(Ok)).left_stream(),
            Err(e) => stream::once(async move { Err(e) }).right_stream(),
        })
}
