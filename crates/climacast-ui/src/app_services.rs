//! Shared services for the dashboard.
//!
//! Clients are built once from the configuration and shared with background
//! tasks through `Arc`. A root cancellation token stops every task on exit.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use climacast_core::Config;
use climacast_forecast::ForecastClient;
use climacast_geocoding::{CachedGeocoder, IpLocator, NominatimClient, NominatimSettings};

use crate::services::ServiceMessage;

pub struct AppServices {
    pub geocoder: Arc<CachedGeocoder>,
    pub forecast: Arc<ForecastClient>,
    pub locator: Arc<IpLocator>,
    tx: mpsc::UnboundedSender<ServiceMessage>,
    shutdown: CancellationToken,
}

impl AppServices {
    /// Build every client from the configuration.
    ///
    /// Returns the services together with the receiving end of the result
    /// channel, which the render loop drains.
    pub fn from_config(config: &Config) -> Result<(Self, mpsc::UnboundedReceiver<ServiceMessage>)> {
        let settings = NominatimSettings {
            base_url: config.geocoding.base_url.clone(),
            user_agent: config.geocoding.user_agent.clone(),
            timeout: Duration::from_secs(config.geocoding.timeout_secs),
            min_request_interval: Duration::from_millis(config.geocoding.min_request_interval_ms),
        };
        let nominatim = NominatimClient::new(settings).context("Failed to create geocoding client")?;
        let geocoder = CachedGeocoder::new(
            nominatim,
            Duration::from_secs(config.geocoding.cache_ttl_secs),
        );

        let forecast = ForecastClient::new(
            config.api.url(),
            Duration::from_secs(config.api.timeout_secs),
        )
        .context("Failed to create forecast client")?;

        let locator = IpLocator::new(
            &config.location.ip_lookup_url,
            Duration::from_secs(config.location.timeout_secs),
        )
        .context("Failed to create location client")?;

        let (tx, rx) = mpsc::unbounded_channel();
        tracing::info!(
            "Services ready (forecast API: {}, geocoder: {})",
            forecast.base_url(),
            config.geocoding.base_url
        );

        Ok((
            Self {
                geocoder: Arc::new(geocoder),
                forecast: Arc::new(forecast),
                locator: Arc::new(locator),
                tx,
                shutdown: CancellationToken::new(),
            },
            rx,
        ))
    }

    pub fn sender(&self) -> &mpsc::UnboundedSender<ServiceMessage> {
        &self.tx
    }

    /// Token for a new task; cancelled on shutdown
    pub fn task_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Cancel every outstanding task
    pub fn shutdown(&self) {
        tracing::info!("Shutting down background tasks");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
