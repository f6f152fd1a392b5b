//! Dashboard page state.

use climacast_core::Config;
use climacast_forecast::ForecastState;
use climacast_geocoding::{Place, PresetCity, POPULAR_CITIES};

use crate::search::SearchState;

/// The place whose forecast is on screen
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Place> for SelectedLocation {
    fn from(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            lat: place.lat,
            lon: place.lon,
        }
    }
}

impl From<&PresetCity> for SelectedLocation {
    fn from(city: &PresetCity) -> Self {
        Self {
            name: city.name.to_string(),
            lat: city.lat,
            lon: city.lon,
        }
    }
}

/// Keyboard focus within the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Search,
    Presets,
}

/// Tickets for the two fetches started by a location change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchPlan {
    pub forecast_ticket: u64,
    pub extreme_ticket: Option<u64>,
    pub lat: f64,
    pub lon: f64,
    pub days: u8,
}

pub struct DashboardModel {
    pub location: SelectedLocation,
    pub forecast: ForecastState,
    pub search: SearchState,
    pub focus: Focus,
    pub preset_cursor: usize,
    /// Day whose readings the trend chart spells out
    pub chart_cursor: usize,
    api_url: String,
    days: u8,
}

impl DashboardModel {
    pub fn new(config: &Config) -> Self {
        let default = &config.dashboard.default_location;
        Self {
            location: SelectedLocation {
                name: default.name.clone(),
                lat: default.lat,
                lon: default.lon,
            },
            forecast: ForecastState::new(),
            search: SearchState::new(),
            focus: Focus::None,
            preset_cursor: 0,
            chart_cursor: 0,
            api_url: config.api.url().to_string(),
            days: config.dashboard.forecast_days,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Switch to a new location and plan both fetches for it
    pub fn select(&mut self, location: SelectedLocation) -> FetchPlan {
        tracing::info!(
            "Selected location: {} ({}, {})",
            location.name,
            location.lat,
            location.lon
        );
        self.location = location;
        self.reload()
    }

    /// Plan both fetches for the current location
    pub fn reload(&mut self) -> FetchPlan {
        self.chart_cursor = 0;
        FetchPlan {
            forecast_ticket: self.forecast.begin_forecast(),
            extreme_ticket: Some(self.forecast.begin_extreme()),
            lat: self.location.lat,
            lon: self.location.lon,
            days: self.days,
        }
    }

    /// Retry the forecast only, as the "No Weather Data" panel does
    pub fn retry(&mut self) -> FetchPlan {
        FetchPlan {
            forecast_ticket: self.forecast.begin_forecast(),
            extreme_ticket: None,
            lat: self.location.lat,
            lon: self.location.lon,
            days: self.days,
        }
    }

    /// True until the first fetch has been started
    pub fn needs_initial_load(&self) -> bool {
        self.forecast.forecast.is_none() && !self.forecast.loading
    }

    /// Pick the preset under the cursor. The search input is left as is.
    pub fn select_preset(&mut self) -> Option<FetchPlan> {
        let city = POPULAR_CITIES.get(self.preset_cursor)?;
        self.search.dismiss();
        Some(self.select(SelectedLocation::from(city)))
    }

    pub fn move_preset_cursor(&mut self, delta: isize) {
        let len = POPULAR_CITIES.len() as isize;
        let next = (self.preset_cursor as isize + delta).rem_euclid(len);
        self.preset_cursor = next as usize;
    }

    /// Move the chart cursor, stopping at the first and last day
    pub fn move_chart_cursor(&mut self, delta: isize) {
        let last = self.forecast.days().len().saturating_sub(1) as isize;
        let next = (self.chart_cursor as isize + delta).clamp(0, last);
        self.chart_cursor = next as usize;
    }

    pub fn is_current(&self, city: &PresetCity) -> bool {
        self.location.name == city.name
    }

    /// Text of the connection error banner, if a fetch failed
    pub fn error_banner(&self) -> Option<String> {
        self.forecast.error.as_ref().map(|error| {
            format!(
                "{}. Please check if your backend server is running on {}",
                error, self.api_url
            )
        })
    }
}
