//! Connection check against the usage endpoint.

use oxrates_fetch::{ApiClient, HttpRequest};
use oxrates_types::ConnectorConfig;
use serde::Deserialize;
use serde_json::Value;

/// Path of the usage and quota endpoint.
pub const USAGE_PATH: &str = "usage.json";

/// Message reported when the account has no requests left.
pub const QUOTA_EXCEEDED: &str = "Quota exceeded";

/// Outcome of a connection check.
///
/// A failed check is a normal outcome, not an error: `message` explains it
/// to the user before any sync starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// Whether a sync can proceed.
    pub ok: bool,
    /// Why the check failed, when known.
    pub message: Option<String>,
}

impl ConnectionStatus {
    /// A passing check.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    /// A failing check with an optional explanation.
    #[must_use]
    pub const fn failed(message: Option<String>) -> Self {
        Self { ok: false, message }
    }
}

#[derive(Debug, Deserialize)]
struct UsageResponse {
    data: UsageData,
}

#[derive(Debug, Deserialize)]
struct UsageData {
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Usage {
    requests_remaining: f64,
}

/// Checks credentials and remaining quota.
///
/// Makes exactly one request, without retries. Every failure, including
/// transport errors and unexpected bodies, is reported through the returned
/// status rather than as an error.
pub async fn check_connection(client: &ApiClient, config: &ConnectorConfig) -> ConnectionStatus {
    let request = HttpRequest::get(USAGE_PATH)
        .with_header("Authorization", format!("Token {}", config.app_id()));

    match client.send_once(&request).await {
        Ok(response) => {
            tracing::info!("Ping response code: {}", response.status.as_u16());
            evaluate_usage(response.status.as_u16(), &response.body)
        }
        Err(e) => {
            tracing::warn!(error = %e, "usage request failed");
            ConnectionStatus::failed(Some(e.to_string()))
        }
    }
}

/// Interprets a usage endpoint response.
#[must_use]
pub fn evaluate_usage(status: u16, body: &[u8]) -> ConnectionStatus {
    let json: Value = match serde_json::from_slice(body) {
        Ok(json) => json,
        Err(e) => return ConnectionStatus::failed(Some(format!("Invalid response body: {e}"))),
    };

    if status != 200 {
        let description = json
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        return ConnectionStatus::failed(description);
    }

    match serde_json::from_value::<UsageResponse>(json) {
        Ok(usage) if usage.data.usage.requests_remaining > 0.0 => ConnectionStatus::succeeded(),
        Ok(_) => ConnectionStatus::failed(Some(QUOTA_EXCEEDED.to_string())),
        Err(e) => ConnectionStatus::failed(Some(format!("Unexpected usage response: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_body(remaining: i64) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "status": 200,
            "data": {
                "app_id": "k",
                "status": "active",
                "plan": {"name": "Free", "quota": "1000 requests / month"},
                "usage": {
                    "requests": 10,
                    "requests_quota": 1000,
                    "requests_remaining": remaining,
                    "days_elapsed": 3,
                    "days_remaining": 27,
                    "daily_average": 3
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_quota_remaining() {
        assert_eq!(
            evaluate_usage(200, &usage_body(5)),
            ConnectionStatus::succeeded()
        );
    }

    #[test]
    fn test_quota_exceeded() {
        assert_eq!(
            evaluate_usage(200, &usage_body(0)),
            ConnectionStatus::failed(Some("Quota exceeded".to_string()))
        );
    }

    #[test]
    fn test_fractional_quota_values() {
        let body = |remaining: &str| {
            format!(r#"{{"data": {{"usage": {{"requests_remaining": {remaining}}}}}}}"#)
        };
        assert!(evaluate_usage(200, body("5.0").as_bytes()).ok);
        assert!(evaluate_usage(200, body("0.5").as_bytes()).ok);
        assert_eq!(
            evaluate_usage(200, body("0.0").as_bytes()),
            ConnectionStatus::failed(Some(QUOTA_EXCEEDED.to_string()))
        );
        assert!(!evaluate_usage(200, body("-1").as_bytes()).ok);
    }

    #[test]
    fn test_error_status_uses_description() {
        let body = br#"{"error": true, "status": 403, "description": "invalid app_id"}"#;
        assert_eq!(
            evaluate_usage(403, body),
            ConnectionStatus::failed(Some("invalid app_id".to_string()))
        );
    }

    #[test]
    fn test_error_status_without_description() {
        assert_eq!(
            evaluate_usage(401, br#"{"error": true}"#),
            ConnectionStatus::failed(None)
        );
    }

    #[test]
    fn test_malformed_body() {
        let status = evaluate_usage(200, b"<html>oops</html>");
        assert!(!status.ok);
        assert!(status.message.unwrap().starts_with("Invalid response body"));
    }

    #[test]
    fn test_missing_usage_fields() {
        let status = evaluate_usage(200, br#"{"data": {}}"#);
        assert!(!status.ok);
        assert!(status.message.unwrap().contains("usage"));
    }
}
