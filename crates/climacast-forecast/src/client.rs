//! Prediction backend client (Prithvi WxC forecasts).

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::types::{DayForecast, ExtremeEvent, ForecastRequest, ModelInfo};

const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";
const SERVER_MESSAGE: &str = "Server error occurred";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Normalized failure of any backend call.
///
/// `status` is the HTTP status when the server answered, `0` when no
/// response arrived, and `-1` for anything else.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: i32,
    pub data: Option<Value>,
}

impl ApiError {
    fn from_response(status: u16, body: &[u8]) -> Self {
        let data = serde_json::from_slice::<Value>(body).ok().or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(Value::String(text))
        });

        let message = data
            .as_ref()
            .and_then(|d| d.get("error"))
            .and_then(|e| e.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(SERVER_MESSAGE)
            .to_string();

        Self {
            message,
            status: i32::from(status),
            data,
        }
    }

    fn network() -> Self {
        Self {
            message: NETWORK_MESSAGE.to_string(),
            status: 0,
            data: None,
        }
    }

    fn unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.is_empty() {
                UNEXPECTED_MESSAGE.to_string()
            } else {
                message
            },
            status: -1,
            data: None,
        }
    }

    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::unexpected(error.to_string())
        } else {
            tracing::debug!("No response from backend: {}", error);
            Self::network()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a forecast for a location
    #[instrument(skip(self), level = "info")]
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DayForecast>, ApiError> {
        let body = ForecastRequest {
            latitude,
            longitude,
            days,
        };
        let path = "/predictions/prithvi/forecast";
        let request = self.request(Method::POST, path).json(&body);
        let data: Value = self.send(request, Method::POST, path).await?;

        match data.get("forecast") {
            Some(list @ Value::Array(_)) => {
                let days: Vec<DayForecast> = serde_json::from_value(list.clone())
                    .map_err(|e| ApiError::unexpected(format!("Invalid forecast entry: {}", e)))?;
                tracing::info!("Forecast received: {} days", days.len());
                Ok(days)
            }
            _ => {
                tracing::warn!("Invalid forecast data structure: {}", data);
                Ok(Vec::new())
            }
        }
    }

    /// Detect extreme weather events for a location
    #[instrument(skip(self), level = "info")]
    pub async fn get_extreme_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ExtremeEvent>, ApiError> {
        let path = "/predictions/prithvi/extreme-weather";
        let request = self.request(Method::GET, path).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
        ]);
        let data: Value = self.send(request, Method::GET, path).await?;

        match data.get("extremeEvents") {
            Some(events @ Value::Array(_)) => serde_json::from_value(events.clone())
                .map_err(|e| ApiError::unexpected(format!("Invalid extreme event: {}", e))),
            _ => Ok(Vec::new()),
        }
    }

    /// Model metadata
    pub async fn get_model_info(&self) -> Result<ModelInfo, ApiError> {
        let path = "/predictions/prithvi/info";
        let request = self.request(Method::GET, path);
        self.send(request, Method::GET, path).await
    }

    /// Backend liveness check
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        let path = "/";
        let request = self.request(Method::GET, path);
        self.send(request, Method::GET, path).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!("API Request: {} {}", method, path);

        let response = request.send().await.map_err(|e| {
            tracing::error!("API Error: {} {}: {}", method, path, e);
            ApiError::from_transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), &body);
            tracing::error!("API Error: {} {} -> {} {}", method, path, error.status, error.message);
            return Err(error);
        }

        tracing::debug!("API Response: {} ({} bytes)", path, body.len());
        serde_json::from_slice(&body).map_err(|e| ApiError::unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ForecastClient {
        ForecastClient::new(&format!("{}/api", server.uri()), Duration::from_secs(30)).unwrap()
    }

    fn day(date: &str, mean: f64) -> Value {
        serde_json::json!({
            "date": date,
            "temperature": {"min": mean - 5.0, "max": mean + 5.0, "mean": mean},
            "precipitation": {"probability": 10},
            "wind": {"maxSpeed": 12.0},
            "weatherCode": 0,
            "confidence": 90,
            "atmosphericPattern": "high_pressure"
        })
    }

    #[tokio::test]
    async fn test_get_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/predictions/prithvi/forecast"))
            .and(body_json(serde_json::json!({"latitude": 28.6139, "longitude": 77.209, "days": 7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "forecast": [day("2026-10-16", 30.0), day("2026-10-17", 31.0)]
            })))
            .mount(&server)
            .await;

        let days = client_for(&server).get_forecast(28.6139, 77.209, 7).await.unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[1].temperature.mean, 31.0);
        assert_eq!(days[0].atmospheric_pattern, "high_pressure");
    }

    #[tokio::test]
    async fn test_forecast_without_array_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/predictions/prithvi/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "queued"})),
            )
            .mount(&server)
            .await;

        let days = client_for(&server).get_forecast(1.0, 2.0, 7).await.unwrap();
        assert!(days.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_uses_body_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/predictions/prithvi/forecast"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "Model not loaded"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_forecast(1.0, 2.0, 7).await.unwrap_err();

        assert_eq!(err.message, "Model not loaded");
        assert_eq!(err.status, 500);
        assert_eq!(err.data, Some(serde_json::json!({"error": "Model not loaded"})));
    }

    #[tokio::test]
    async fn test_server_error_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/predictions/prithvi/info"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_model_info().await.unwrap_err();

        assert_eq!(err.message, "Server error occurred");
        assert_eq!(err.status, 404);
        assert_eq!(err.data, Some(Value::String("Not Found".into())));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = ForecastClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();

        let err = client.health_check().await.unwrap_err();

        assert_eq!(err.status, 0);
        assert_eq!(err.message, "Network error. Please check your connection.");
    }

    #[tokio::test]
    async fn test_malformed_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).health_check().await.unwrap_err();
        assert_eq!(err.status, -1);
    }

    #[tokio::test]
    async fn test_get_extreme_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/predictions/prithvi/extreme-weather"))
            .and(query_param("latitude", "19.076"))
            .and(query_param("longitude", "72.8777"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "extremeEvents": [{
                    "day": 2, "date": "2026-10-17", "type": "heavy_rain", "severity": "medium",
                    "description": "Heavy rainfall expected", "recommendation": "Avoid low-lying areas"
                }]
            })))
            .mount(&server)
            .await;

        let events = client_for(&server)
            .get_extreme_weather(19.076, 72.8777)
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].recommendation, "Avoid low-lying areas");
    }

    #[tokio::test]
    async fn test_extreme_weather_missing_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/predictions/prithvi/extreme-weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let events = client_for(&server).get_extreme_weather(0.0, 0.0).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_model_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/predictions/prithvi/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Prithvi WxC", "parameters": "2.3B"
            })))
            .mount(&server)
            .await;

        let info = client_for(&server).get_model_info().await.unwrap();
        assert_eq!(info.field("name"), Some("Prithvi WxC"));
    }
}
