//! Forecast service for ClimaCast
//!
//! Client for the prediction backend (7-day forecasts and extreme-weather
//! detection), the types it returns, and the rules that turn them into
//! dashboard cards, chart series and alerts.

pub mod client;
pub mod condition;
pub mod display;
pub mod state;
pub mod types;

pub use client::{ApiError, ForecastClient};
pub use condition::WeatherCondition;
pub use display::{AlertVariant, ChartPoint, ConfidenceLevel, DayCard, TemperatureBand};
pub use state::{ForecastState, ForecastView};
pub use types::*;
