//! HTTP client for the exchange rates API.

use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

use crate::HttpRequest;

/// Base URL of the Open Exchange Rates API.
pub const BASE_URL: &str = "https://openexchangerates.org/api/";

/// Longest response body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; request paths are resolved against it.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("oxrates/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while talking to the API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL or a request path could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server kept failing after all retries.
    #[error("Server error: {status} after {attempts} attempts")]
    ServerError {
        /// HTTP status code of the last attempt.
        status: u16,
        /// Number of attempts made.
        attempts: u32,
    },

    /// Server rejected the request.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
}

/// A response whose status has not been interpreted.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Raw body.
    pub body: Bytes,
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new API client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be created.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        // Url::join drops the last segment unless the base ends with a slash.
        let base = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url =
            Url::parse(&base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves a request's path and query parameters against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn url_for(&self, request: &HttpRequest) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", request.path)))?;
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.params);
        }
        Ok(url)
    }

    /// Sends a request once and returns the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received.
    pub async fn send_once(&self, request: &HttpRequest) -> Result<ApiResponse, FetchError> {
        let url = self.url_for(request)?;
        let mut builder = self.client.get(url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(ApiResponse { status, body })
    }

    /// Sends a request, retrying transient failures, and returns the body of
    /// a successful response.
    ///
    /// Rate limiting (429), server errors (5xx), timeouts and connection
    /// failures are retried with exponential backoff. Any other non-success
    /// status fails immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries.
    pub async fn send(&self, request: &HttpRequest) -> Result<Bytes, FetchError> {
        let mut attempts = 0;

        loop {
            match self.send_once(request).await {
                Ok(response) if response.status.is_success() => return Ok(response.body),
                Ok(response) => {
                    let status = response.status;
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tracing::warn!(
                                path = %request.path,
                                status = status.as_u16(),
                                attempt = attempts,
                                delay_ms = delay.as_millis() as u64,
                                "retrying request"
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(FetchError::ServerError {
                            status: status.as_u16(),
                            attempts: attempts + 1,
                        });
                    }

                    return Err(FetchError::Status {
                        url: self.url_for(request)?.to_string(),
                        status: status.as_u16(),
                        body: truncate_body(&response.body),
                    });
                }
                Err(FetchError::Http(e))
                    if self.is_retryable_error(&e) && attempts < self.config.max_retries =>
                {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tracing::warn!(
                        path = %request.path,
                        error = %e,
                        attempt = attempts,
                        delay_ms = delay.as_millis() as u64,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_delay * 2^attempt
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter within ±25%
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if a transport error is retryable.
    fn is_retryable_error(&self, error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }

        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
