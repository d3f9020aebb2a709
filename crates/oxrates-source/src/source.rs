//! The source: configuration bound to its streams.

use oxrates_fetch::ApiClient;
use oxrates_types::{Clock, ConnectorConfig, SystemClock};
use std::sync::Arc;

use crate::{
    Catalog, ConnectionStatus, HistoricalRates, StreamDescriptor, check_connection, rates_schema,
};

/// Open Exchange Rates source.
///
/// Offers a single stream, [`HistoricalRates`].
#[derive(Debug, Clone)]
pub struct OpenExchangeRates {
    config: ConnectorConfig,
    clock: Arc<dyn Clock>,
}

impl OpenExchangeRates {
    /// Creates a source that reads "today" from the system clock.
    #[must_use]
    pub fn new(config: ConnectorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a source with an explicit clock.
    #[must_use]
    pub fn with_clock(config: ConnectorConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Returns the source configuration.
    #[must_use]
    pub const fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Verifies credentials and quota before a sync.
    pub async fn check(&self, client: &ApiClient) -> ConnectionStatus {
        check_connection(client, &self.config).await
    }

    /// Returns the historical rates stream.
    #[must_use]
    pub fn rates(&self) -> HistoricalRates {
        HistoricalRates::with_clock(&self.config, Arc::clone(&self.clock))
    }

    /// Describes the streams this source offers.
    #[must_use]
    pub fn discover(&self) -> Catalog {
        Catalog {
            streams: vec![StreamDescriptor::incremental(&self.rates(), rates_schema())],
        }
    }
}
