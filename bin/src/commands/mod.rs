//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod discover;
pub(crate) mod read;
pub(crate) mod spec;

use anyhow::{Context, Result};
use oxrates_lib::{ConnectorConfig, STREAM_NAME, SyncState};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Loads and validates the connector configuration file.
pub(crate) fn load_config(path: &Path) -> Result<ConnectorConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Loads sync state, accepting either a bare `{"timestamp": ...}` object or
/// one keyed by stream name.
pub(crate) fn load_state(path: &Path) -> Result<SyncState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(SyncState::default());
    }

    let mut value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid state file {}", path.display()))?;
    if let Some(stream_state) = value.get_mut(STREAM_NAME) {
        value = stream_state.take();
    }
    serde_json::from_value(value)
        .with_context(|| format!("Invalid state in {}", path.display()))
}
