//! "Use my location": device position plus reverse geocoding.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use climacast_geocoding::{use_my_location, CachedGeocoder, GeocodeError, IpLocator, LocationError};

use super::ServiceMessage;

/// Error type for location lookups
#[derive(Debug)]
pub enum LocateError {
    /// The device position could not be determined
    Device(LocationError),
    /// The position was found but could not be named
    Reverse(String),
}

impl std::fmt::Display for LocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocateError::Device(e) => write!(f, "Device location error: {}", e),
            LocateError::Reverse(s) => write!(f, "Reverse geocoding error: {}", s),
        }
    }
}

impl std::error::Error for LocateError {}

impl From<GeocodeError> for LocateError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::Location(inner) => LocateError::Device(inner),
            other => LocateError::Reverse(other.to_string()),
        }
    }
}

/// Locate the device and name the place. Sends `LocateDone`.
pub fn request_locate(
    tx: &UnboundedSender<ServiceMessage>,
    locator: Arc<IpLocator>,
    geocoder: Arc<CachedGeocoder>,
    token: CancellationToken,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Location lookup cancelled");
            }
            result = use_my_location(&locator, &geocoder) => {
                if let Err(e) = &result {
                    tracing::error!("Error getting location: {}", e);
                }
                let _ = tx.send(ServiceMessage::LocateDone(result.map_err(LocateError::from)));
            }
        }
    });
}
