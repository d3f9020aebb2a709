//! Check command implementation.
//!
//! Reports credential and quota problems as a failed connection status
//! rather than an error exit, so the caller can show the reason to a user.

use anyhow::Result;
use oxrates_lib::prelude::*;
use std::io::{self, Write};
use std::path::Path;

use super::load_config;
use crate::message::Message;

/// Validate the configuration and check the connection.
pub(crate) async fn check(config_path: &Path, client_config: ClientConfig) -> Result<()> {
    check_into(config_path, client_config, io::stdout().lock()).await
}

/// Runs the check and writes the CONNECTION_STATUS message to `out`.
async fn check_into<W: Write>(
    config_path: &Path,
    client_config: ClientConfig,
    out: W,
) -> Result<()> {
    let status = match load_config(config_path) {
        Ok(config) => {
            let client = ApiClient::new(client_config)?;
            OpenExchangeRates::new(config).check(&client).await
        }
        Err(e) => ConnectionStatus::failed(Some(format!("{e:#}"))),
    };

    if status.ok {
        tracing::info!("connection check succeeded");
    } else {
        tracing::warn!(reason = ?status.message, "connection check failed");
    }

    Message::connection_status(status).emit(out)
}
