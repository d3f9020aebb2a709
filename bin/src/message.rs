//! Pipeline message envelope written to stdout, one JSON object per line.

use anyhow::Result;
use oxrates_lib::{Catalog, ConnectionStatus, RateRecord, SyncState};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Documentation link reported in the connector specification.
const DOCUMENTATION_URL: &str = "https://docs.openexchangerates.org/reference/historical-json";

/// A single protocol message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum Message<'a> {
    Spec {
        spec: SpecPayload,
    },
    ConnectionStatus {
        #[serde(rename = "connectionStatus")]
        connection_status: StatusPayload,
    },
    Catalog {
        catalog: &'a Catalog,
    },
    Record {
        record: RecordPayload<'a>,
    },
    State {
        state: StatePayload,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpecPayload {
    documentation_url: &'static str,
    connection_specification: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusPayload {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordPayload<'a> {
    stream: &'a str,
    data: &'a Value,
    emitted_at: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatePayload {
    data: SyncState,
}

impl<'a> Message<'a> {
    pub(crate) const fn spec(connection_specification: Value) -> Self {
        Self::Spec {
            spec: SpecPayload {
                documentation_url: DOCUMENTATION_URL,
                connection_specification,
            },
        }
    }

    pub(crate) fn connection_status(status: ConnectionStatus) -> Self {
        Self::ConnectionStatus {
            connection_status: StatusPayload {
                status: if status.ok { "SUCCEEDED" } else { "FAILED" },
                message: status.message,
            },
        }
    }

    pub(crate) const fn catalog(catalog: &'a Catalog) -> Self {
        Self::Catalog { catalog }
    }

    pub(crate) fn record(stream: &'a str, record: &'a RateRecord) -> Self {
        Self::Record {
            record: RecordPayload {
                stream,
                data: &record.data,
                emitted_at: chrono::Utc::now().timestamp_millis(),
            },
        }
    }

    pub(crate) const fn state(state: SyncState) -> Self {
        Self::State {
            state: StatePayload { data: state },
        }
    }

    /// Writes the message as one line of JSON.
    pub(crate) fn emit<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use oxrates_lib::DateSlice;
    use serde_json::json;

    fn emitted(message: &Message<'_>) -> Value {
        let mut out = Vec::new();
        message.emit(&mut out).unwrap();
        assert!(out.ends_with(b"\n"));
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_connection_status_messages() {
        let ok = emitted(&Message::connection_status(ConnectionStatus::succeeded()));
        assert_eq!(
            ok,
            json!({"type": "CONNECTION_STATUS", "connectionStatus": {"status": "SUCCEEDED"}})
        );

        let failed = emitted(&Message::connection_status(ConnectionStatus::failed(Some(
            "Quota exceeded".to_string(),
        ))));
        assert_eq!(failed["connectionStatus"]["status"], "FAILED");
        assert_eq!(failed["connectionStatus"]["message"], "Quota exceeded");
    }

    #[test]
    fn test_record_and_state_messages() {
        let day = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let record = RateRecord::new(DateSlice::new(day), json!({"base": "EUR"}));

        let message = emitted(&Message::record("open_exchange_rates", &record));
        assert_eq!(message["type"], "RECORD");
        assert_eq!(message["record"]["stream"], "open_exchange_rates");
        assert_eq!(message["record"]["data"], json!({"base": "EUR"}));
        assert!(message["record"]["emitted_at"].is_i64());

        let state = emitted(&Message::state(SyncState::at(day)));
        assert_eq!(
            state,
            json!({"type": "STATE", "state": {"data": {"timestamp": "2022-01-03"}}})
        );
    }

    #[test]
    fn test_spec_message() {
        let message = emitted(&Message::spec(json!({"type": "object"})));
        assert_eq!(message["type"], "SPEC");
        assert_eq!(
            message["spec"]["connectionSpecification"],
            json!({"type": "object"})
        );
        assert!(message["spec"]["documentationUrl"].is_string());
    }
}
