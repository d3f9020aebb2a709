//! Read command implementation.
//!
//! Streams one RECORD per day to stdout, each followed by a STATE message
//! carrying the cursor so far. Persisting the last STATE is up to the caller.

use anyhow::{Context, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use oxrates_lib::prelude::*;
use std::io::{self, Write};
use std::path::Path;

use super::{load_config, load_state};
use crate::message::Message;

/// Read rates for every day not yet synced.
pub(crate) async fn read(
    config_path: &Path,
    state_path: Option<&Path>,
    client_config: ClientConfig,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let state = match state_path {
        Some(path) => load_state(path)?,
        None => SyncState::default(),
    };

    let source = OpenExchangeRates::new(config);
    let client = ApiClient::new(client_config).context("Failed to create HTTP client")?;
    let rates = source.rates();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} days ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(rates.name().to_string());
        pb
    };

    let result = sync(&client, &rates, state, io::stdout().lock(), &progress).await;
    match &result {
        Ok(synced) => {
            progress.finish_with_message(format!("Synced {synced} days"));
            tracing::info!(days = synced, "read finished");
        }
        Err(e) => {
            progress.abandon_with_message("Sync failed");
            tracing::error!(error = %format!("{e:#}"), "read failed");
        }
    }
    result.map(|_| ())
}

/// Reads `rates` from `state` onwards, writing messages to `out`.
///
/// The days to read are computed once; their count sets the length of
/// `progress`. Returns the number of records written. Stops at the first
/// failed day; everything emitted before it stays valid.
pub(crate) async fn sync<W: Write>(
    client: &ApiClient,
    rates: &HistoricalRates,
    state: SyncState,
    mut out: W,
    progress: &ProgressBar,
) -> Result<u64> {
    let slices = rates.stream_slices(&state);
    progress.set_length(slices.len() as u64);
    tracing::info!(
        stream = rates.name(),
        days = slices.len(),
        resume = ?state.timestamp,
        "starting read"
    );

    let mut cursor = state;
    let mut synced = 0u64;
    let mut records = std::pin::pin!(slice_records(client, rates, slices));

    while let Some(record) = records.next().await {
        let record = record.with_context(|| match cursor.timestamp {
            Some(last) => format!("Read failed after {synced} records (last synced day {last})"),
            None => format!("Read failed after {synced} records"),
        })?;

        Message::record(rates.name(), &record).emit(&mut out)?;
        cursor.observe(&record.slice);
        Message::state(cursor).emit(&mut out)?;

        synced += 1;
        progress.inc(1);
    }

    Ok(synced)
}
