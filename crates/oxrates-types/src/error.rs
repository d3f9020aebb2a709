//! Error types for oxrates.

use thiserror::Error;

/// Errors that can occur while syncing exchange rates.
#[derive(Error, Debug)]
pub enum OxratesError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a status the sync cannot continue from.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors for invalid connector configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A date could not be parsed.
    #[error("Invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The field holding the date.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err: OxratesError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, OxratesError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::MissingField("app_id").to_string(),
            "Missing required field: app_id"
        );
        let err = ConfigError::InvalidDate {
            field: "start_date",
            value: "soon".to_string(),
        };
        assert!(err.to_string().contains("start_date"));
    }
}
