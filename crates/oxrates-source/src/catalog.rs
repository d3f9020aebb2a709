//! Connector specification and stream catalog.

use oxrates_fetch::HttpStream;
use serde::Serialize;
use serde_json::{Value, json};

/// How a stream may be synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Re-read everything from the configured start date.
    FullRefresh,
    /// Resume from the last persisted cursor.
    Incremental,
}

/// Catalog entry for one stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamDescriptor {
    /// Stream name.
    pub name: String,
    /// JSON schema of the stream's records.
    pub json_schema: Value,
    /// Supported sync modes.
    pub supported_sync_modes: Vec<SyncMode>,
    /// Whether the source decides the cursor field.
    pub source_defined_cursor: bool,
    /// Cursor field path.
    pub default_cursor_field: Vec<String>,
}

impl StreamDescriptor {
    /// Describes an incremental stream with the given record schema.
    #[must_use]
    pub fn incremental(stream: &dyn HttpStream, json_schema: Value) -> Self {
        Self {
            name: stream.name().to_string(),
            json_schema,
            supported_sync_modes: vec![SyncMode::FullRefresh, SyncMode::Incremental],
            source_defined_cursor: true,
            default_cursor_field: vec![stream.cursor_field().to_string()],
        }
    }
}

/// The set of streams a source offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    /// Available streams.
    pub streams: Vec<StreamDescriptor>,
}

/// JSON schema of the connector configuration.
#[must_use]
pub fn connection_specification() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Open Exchange Rates Spec",
        "type": "object",
        "required": ["app_id", "start_date"],
        "additionalProperties": true,
        "properties": {
            "app_id": {
                "type": "string",
                "description": "App ID provided by Open Exchange Rates",
                "airbyte_secret": true
            },
            "start_date": {
                "type": "string",
                "description": "Start getting data from that date.",
                "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
                "examples": ["YYYY-MM-DD"]
            },
            "base": {
                "type": "string",
                "description": "Change base currency (3-letter code, default is USD - only modifiable in paid plans)",
                "examples": ["EUR", "USD"]
            }
        }
    })
}

/// JSON schema of a historical rates record.
#[must_use]
pub fn rates_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "disclaimer": {"type": ["null", "string"]},
            "license": {"type": ["null", "string"]},
            "timestamp": {"type": ["null", "integer"]},
            "base": {"type": ["null", "string"]},
            "rates": {
                "type": ["null", "object"],
                "additionalProperties": {"type": "number"}
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_mode_names() {
        let modes = serde_json::to_value([SyncMode::FullRefresh, SyncMode::Incremental]).unwrap();
        assert_eq!(modes, json!(["full_refresh", "incremental"]));
    }

    #[test]
    fn test_specification_requires_credentials() {
        let spec = connection_specification();
        assert_eq!(spec["required"], json!(["app_id", "start_date"]));
        assert_eq!(spec["properties"]["app_id"]["airbyte_secret"], json!(true));
        assert!(spec["properties"]["base"].is_object());
    }

    #[test]
    fn test_rates_schema_has_rates_map() {
        let schema = rates_schema();
        assert_eq!(
            schema["properties"]["rates"]["additionalProperties"]["type"],
            "number"
        );
    }
}
