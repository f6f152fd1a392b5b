//! Approximate device location.
//!
//! A terminal has no browser geolocation API, so the position comes from an
//! IP geolocation endpoint (ip-api.com compatible).

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::cache::CachedGeocoder;
use crate::error::{GeocodeError, LocationError};
use crate::types::{Coordinates, Place};

pub const IP_LOOKUP_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    url: String,
}

impl IpLocator {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Look up the current position
    pub async fn current_location(&self) -> Result<Coordinates, LocationError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                LocationError::Timeout
            } else {
                tracing::debug!("Location lookup failed: {}", e);
                LocationError::ServiceUnavailable
            }
        })?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            tracing::debug!("Location lookup returned status {}", status);
            return Err(LocationError::ServiceUnavailable);
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Other(e.to_string()))?;

        if body.status.as_deref() == Some("fail") {
            tracing::debug!(
                "Location lookup refused: {}",
                body.message.as_deref().unwrap_or("no reason given")
            );
            return Err(LocationError::ServiceUnavailable);
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::info!("Got device location: ({}, {})", latitude, longitude);
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => Err(LocationError::ServiceUnavailable),
        }
    }
}

/// Locate the device and name the place it is in.
///
/// The returned place keeps the device coordinates rather than the ones the
/// reverse lookup snapped to.
pub async fn use_my_location(
    locator: &IpLocator,
    geocoder: &CachedGeocoder,
) -> Result<Place, GeocodeError> {
    let coords = locator.current_location().await?;
    let mut place = geocoder
        .get_city_name(coords.latitude, coords.longitude)
        .await?;
    place.lat = coords.latitude;
    place.lon = coords.longitude;
    Ok(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::client::{NominatimClient, NominatimSettings};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locator_for(server: &MockServer) -> IpLocator {
        IpLocator::new(&format!("{}/json", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_current_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success", "lat": 12.97, "lon": 77.59, "city": "Bengaluru"
            })))
            .mount(&server)
            .await;

        let coords = locator_for(&server).current_location().await.unwrap();
        assert!((coords.latitude - 12.97).abs() < 1e-9);
        assert!((coords.longitude - 77.59).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail", "message": "private range"
            })))
            .mount(&server)
            .await;

        let result = locator_for(&server).current_location().await;
        assert!(matches!(result, Err(LocationError::ServiceUnavailable)));
    }

    #[tokio::test]
    async fn test_forbidden_is_permission_denied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = locator_for(&server).current_location().await;
        assert!(matches!(result, Err(LocationError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"lat": 1.0, "lon": 2.0}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let locator =
            IpLocator::new(&format!("{}/json", server.uri()), Duration::from_millis(100)).unwrap();
        let result = locator.current_location().await;
        assert!(matches!(result, Err(LocationError::Timeout)));
    }

    #[tokio::test]
    async fn test_use_my_location_keeps_device_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success", "lat": 51.5101, "lon": -0.1340
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "London", "display_name": "London, England, United Kingdom",
                "lat": "51.5074", "lon": "-0.1278"
            })))
            .mount(&server)
            .await;

        let client = NominatimClient::new(NominatimSettings {
            base_url: server.uri(),
            min_request_interval: Duration::from_millis(1),
            ..NominatimSettings::default()
        })
        .unwrap();
        let geocoder = CachedGeocoder::new(client, DEFAULT_TTL);

        let place = use_my_location(&locator_for(&server), &geocoder).await.unwrap();
        assert_eq!(place.name, "London");
        assert!((place.lat - 51.5101).abs() < 1e-9);
        assert!((place.lon + 0.1340).abs() < 1e-9);
    }
}
