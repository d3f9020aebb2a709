//! Connector configuration.

use chrono::{DateTime, NaiveDate};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::slice::DATE_FORMAT;

/// Configuration as supplied by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfig {
    /// App ID used to authenticate against the API.
    #[serde(default)]
    pub app_id: String,
    /// First day to fetch (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: String,
    /// Optional base currency, sent as given; the API defaults to USD when
    /// omitted.
    #[serde(default)]
    pub base: Option<String>,
}

/// Base currency exactly as configured.
///
/// The value is forwarded to the API verbatim; the API decides whether it
/// names a currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wraps a configured base currency without altering it.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated connector configuration.
///
/// Immutable for the lifetime of a sync. Deserializes from the same JSON
/// shape as [`RawConfig`] and validates on the way in.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct ConnectorConfig {
    app_id: String,
    start_date: NaiveDate,
    base: Option<CurrencyCode>,
}

impl ConnectorConfig {
    /// Creates a configuration from already-typed parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `app_id` is blank.
    pub fn new(
        app_id: impl Into<String>,
        start_date: NaiveDate,
        base: Option<CurrencyCode>,
    ) -> Result<Self, ConfigError> {
        let app_id = app_id.into();
        if app_id.trim().is_empty() {
            return Err(ConfigError::MissingField("app_id"));
        }
        Ok(Self {
            app_id,
            start_date,
            base,
        })
    }

    /// Returns the API credential.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the configured first day to fetch.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the configured base currency, if any.
    #[must_use]
    pub const fn base(&self) -> Option<&CurrencyCode> {
        self.base.as_ref()
    }
}

impl TryFrom<RawConfig> for ConnectorConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        if raw.start_date.trim().is_empty() {
            return Err(ConfigError::MissingField("start_date"));
        }
        let start_date = parse_date("start_date", &raw.start_date)?;
        Self::new(raw.app_id, start_date, raw.base.map(CurrencyCode::from))
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("app_id", &"<redacted>")
            .field("start_date", &self.start_date)
            .field("base", &self.base)
            .finish()
    }
}

/// Parses a date given as `YYYY-MM-DD` or as an RFC 3339 date-time.
///
/// For date-times the calendar date in the value's own offset is used.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDate`] naming `field` if neither form parses.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ConfigError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
