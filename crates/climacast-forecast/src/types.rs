use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::condition::WeatherCondition;

pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Body of a forecast request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub days: u8,
}

/// Daily temperature summary in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Precipitation {
    /// Chance of precipitation, 0-100
    #[serde(default)]
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wind {
    /// km/h
    #[serde(default)]
    pub max_speed: f64,
}

/// One day of the model forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    pub date: String,
    pub temperature: TemperatureRange,
    #[serde(default)]
    pub precipitation: Precipitation,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub weather_code: i32,
    /// Model confidence, 0-100
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub atmospheric_pattern: String,
}

impl DayForecast {
    /// Calendar date; accepts `YYYY-MM-DD` or an RFC 3339 timestamp
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weather_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Unknown
    }
}

/// An extreme-weather event detected in the forecast window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeEvent {
    /// 1-based day index within the forecast
    pub day: u32,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendation: String,
}

/// Model metadata as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelInfo(pub serde_json::Value);

impl ModelInfo {
    /// Value of a top-level string field, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }
}
