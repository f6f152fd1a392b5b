//! Forecast fetch state for the dashboard.
//!
//! Each fetch gets a ticket; results carrying an older ticket are ignored so a
//! slow response for a previous location cannot overwrite the current one.

use crate::client::ApiError;
use crate::types::{DayForecast, ExtremeEvent};

/// Skeleton cards shown while a forecast loads
pub const SKELETON_CARDS: usize = 7;

/// What the forecast area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastView {
    Loading,
    Ready,
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct ForecastState {
    pub forecast: Option<Vec<DayForecast>>,
    pub extreme: Option<Vec<ExtremeEvent>>,
    pub loading: bool,
    pub error: Option<String>,
    forecast_ticket: u64,
    extreme_ticket: u64,
}

impl ForecastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a forecast fetch. Returns the ticket to hand back on completion.
    pub fn begin_forecast(&mut self) -> u64 {
        self.forecast_ticket += 1;
        self.loading = true;
        self.error = None;
        self.forecast_ticket
    }

    /// Returns false when the result was stale and dropped.
    pub fn finish_forecast(
        &mut self,
        ticket: u64,
        result: Result<Vec<DayForecast>, ApiError>,
    ) -> bool {
        if ticket != self.forecast_ticket {
            tracing::debug!("Dropping stale forecast result (ticket {})", ticket);
            return false;
        }

        match result {
            Ok(days) => self.forecast = Some(days),
            Err(e) => {
                tracing::error!("Error fetching forecast: {}", e);
                self.error = Some(e.message);
                self.forecast = Some(Vec::new());
            }
        }
        self.loading = false;
        true
    }

    pub fn begin_extreme(&mut self) -> u64 {
        self.extreme_ticket += 1;
        self.extreme_ticket
    }

    /// Extreme-weather failures are logged only; the alert list becomes empty.
    pub fn finish_extreme(
        &mut self,
        ticket: u64,
        result: Result<Vec<ExtremeEvent>, ApiError>,
    ) -> bool {
        if ticket != self.extreme_ticket {
            tracing::debug!("Dropping stale extreme-weather result (ticket {})", ticket);
            return false;
        }

        match result {
            Ok(events) => self.extreme = Some(events),
            Err(e) => {
                tracing::error!("Error fetching extreme weather: {}", e);
                self.extreme = Some(Vec::new());
            }
        }
        true
    }

    /// Clear data, error and loading. In-flight results become stale.
    pub fn reset(&mut self) {
        self.forecast = None;
        self.extreme = None;
        self.loading = false;
        self.error = None;
        self.forecast_ticket += 1;
        self.extreme_ticket += 1;
    }

    pub fn view(&self) -> ForecastView {
        if self.loading {
            ForecastView::Loading
        } else if self.forecast.as_ref().is_some_and(|f| !f.is_empty()) {
            ForecastView::Ready
        } else {
            ForecastView::Empty
        }
    }

    pub fn days(&self) -> &[DayForecast] {
        self.forecast.as_deref().unwrap_or_default()
    }

    pub fn alerts(&self) -> &[ExtremeEvent] {
        self.extreme.as_deref().unwrap_or_default()
    }

    pub fn show_alerts(&self) -> bool {
        !self.loading && !self.alerts().is_empty()
    }
}
