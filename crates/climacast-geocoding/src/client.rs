//! Nominatim (OpenStreetMap) client: free, no API key required.
//!
//! Usage policy: https://operations.osmfoundation.org/policies/nominatim/

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::error::GeocodeError;
use crate::rate_limit::RateLimiter;
use crate::types::{sort_by_relevance, NominatimPlace, Place, Suggestion};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Queries shorter than this return no results without a request
pub const MIN_SEARCH_LEN: usize = 2;
/// Autocomplete needs a little more to be useful
pub const MIN_AUTOCOMPLETE_LEN: usize = 3;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Connection settings for a Nominatim instance
#[derive(Debug, Clone)]
pub struct NominatimSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub min_request_interval: Duration,
}

impl Default for NominatimSettings {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_string(),
            user_agent: format!("ClimaCast/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
            min_request_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl NominatimClient {
    pub fn new(settings: NominatimSettings) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            limiter: Arc::new(RateLimiter::new(settings.min_request_interval)),
        })
    }

    /// Search places by name, best match first.
    ///
    /// Only settlements (cities, towns, villages, ...) are returned.
    #[instrument(skip(self), level = "debug")]
    pub async fn search_cities(&self, query: &str, limit: usize) -> Result<Vec<Place>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }

        self.limiter.acquire().await;
        tracing::debug!("Searching for: \"{}\"", query);

        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
                ("dedupe", "1"),
            ])
            .send()
            .await?;

        let items: Vec<NominatimPlace> = handle_response(response).await?;
        let found = items.len();

        let mut places: Vec<Place> = items
            .into_iter()
            .filter(NominatimPlace::is_settlement)
            .filter_map(NominatimPlace::into_place)
            .collect();
        sort_by_relevance(&mut places);

        tracing::debug!("Found {} results, {} settlements", found, places.len());
        Ok(places)
    }

    /// Best match for a city name, if any
    pub async fn get_coordinates(&self, city: &str) -> Result<Option<Place>, GeocodeError> {
        let results = self.search_cities(city, 1).await?;
        Ok(results.into_iter().next())
    }

    /// Reverse geocode coordinates to a city-level place
    #[instrument(skip(self), level = "debug")]
    pub async fn get_city_name(&self, lat: f64, lon: f64) -> Result<Place, GeocodeError> {
        self.limiter.acquire().await;
        tracing::debug!("Reverse geocoding: ({}, {})", lat, lon);

        let lat = lat.to_string();
        let lon = lon.to_string();
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("zoom", "10"),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::ReverseFailed(e.to_string()))?;

        let body: serde_json::Value = handle_response(response)
            .await
            .map_err(|e| GeocodeError::ReverseFailed(e.to_string()))?;

        // Nominatim answers 200 with {"error": ...} for open ocean and the like
        if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
            return Err(GeocodeError::ReverseFailed(message.to_string()));
        }

        let place: NominatimPlace = serde_json::from_value(body)
            .map_err(|e| GeocodeError::ReverseFailed(e.to_string()))?;
        let place = place
            .into_place()
            .ok_or_else(|| GeocodeError::ReverseFailed("response has no coordinates".to_string()))?;

        tracing::info!("Reverse geocoded to: {}", place.name);
        Ok(place)
    }

    /// Type-ahead suggestions
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        if query.trim().chars().count() < MIN_AUTOCOMPLETE_LEN {
            return Ok(Vec::new());
        }
        let places = self.search_cities(query, DEFAULT_SEARCH_LIMIT).await?;
        Ok(places.into_iter().map(Suggestion::from).collect())
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GeocodeError> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Nominatim rate limit exceeded. Wait before making more requests.");
        Err(GeocodeError::RateLimited)
    } else {
        let message = response.text().await.unwrap_or_default();
        tracing::warn!("Nominatim error {}: {}", status, message);
        Err(GeocodeError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NominatimClient {
        NominatimClient::new(NominatimSettings {
            base_url: server.uri(),
            min_request_interval: Duration::from_millis(1),
            ..NominatimSettings::default()
        })
        .unwrap()
    }

    fn search_body() -> serde_json::Value {
        serde_json::json!([
            {
                "name": "London", "display_name": "London, Ontario, Canada",
                "lat": "42.98", "lon": "-81.24", "type": "city", "class": "place",
                "importance": 0.6,
                "address": {"state": "Ontario", "country": "Canada", "country_code": "ca"}
            },
            {
                "name": "London Road", "display_name": "London Road, Leicester",
                "lat": "52.6", "lon": "-1.1", "type": "primary", "class": "highway",
                "addresstype": "road", "importance": 0.95
            },
            {
                "name": "London", "display_name": "London, Greater London, England, United Kingdom",
                "lat": "51.5074", "lon": "-0.1278", "type": "city", "class": "boundary",
                "importance": 0.9,
                "address": {"state": "England", "country": "United Kingdom", "country_code": "gb"}
            }
        ])
    }

    #[tokio::test]
    async fn test_search_filters_and_sorts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "London"))
            .and(query_param("format", "json"))
            .and(query_param("limit", "5"))
            .and(query_param("addressdetails", "1"))
            .and(query_param("dedupe", "1"))
            .and(header("Accept-Language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .mount(&server)
            .await;

        let places = client_for(&server).search_cities("London", 5).await.unwrap();

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].country_code, "GB");
        assert_eq!(places[1].state, "Ontario");
    }

    #[tokio::test]
    async fn test_short_query_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search_cities("L", 5).await.unwrap().is_empty());
        assert!(client.search_cities("  ", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client_for(&server).search_cities("Paris", 5).await;
        assert!(matches!(result, Err(GeocodeError::RateLimited)));
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = client_for(&server).search_cities("Paris", 5).await;
        match result {
            Err(GeocodeError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_coordinates_uses_limit_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Tokyo", "display_name": "Tokyo, Japan", "lat": "35.68", "lon": "139.76",
                 "type": "city", "importance": 0.8}
            ])))
            .mount(&server)
            .await;

        let place = client_for(&server).get_coordinates("Tokyo").await.unwrap();
        assert_eq!(place.map(|p| p.name), Some("Tokyo".to_string()));
    }

    #[tokio::test]
    async fn test_reverse_geocode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("zoom", "10"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "New York",
                "display_name": "New York, United States",
                "lat": "40.7127", "lon": "-74.0059",
                "address": {"state": "New York", "country": "United States", "country_code": "us"}
            })))
            .mount(&server)
            .await;

        let place = client_for(&server).get_city_name(40.7128, -74.006).await.unwrap();
        assert_eq!(place.name, "New York");
        assert_eq!(place.country_code, "US");
    }

    #[tokio::test]
    async fn test_reverse_geocode_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "Unable to geocode"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).get_city_name(0.0, -140.0).await;
        assert!(matches!(result, Err(GeocodeError::ReverseFailed(_))));
    }

    #[tokio::test]
    async fn test_autocomplete_needs_three_chars() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.autocomplete("Lo").await.unwrap().is_empty());

        let suggestions = client.autocomplete("Lon").await.unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].value, "London");
        assert_eq!(
            suggestions[0].label,
            "London, Greater London, England, United Kingdom"
        );
    }
}
