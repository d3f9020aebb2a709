//! Discover command implementation.

use anyhow::Result;
use oxrates_lib::prelude::*;
use std::io;
use std::path::Path;

use super::load_config;
use crate::message::Message;

/// Print the catalog of available streams.
pub(crate) fn discover(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = OpenExchangeRates::new(config).discover();
    Message::catalog(&catalog).emit(io::stdout().lock())
}
