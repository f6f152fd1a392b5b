//! Background work for the dashboard.
//! Every network call runs on a tokio task; results come back over an mpsc
//! channel that the render loop drains between frames.

pub mod forecast_service;
pub mod location_service;
pub mod search_service;

use climacast_forecast::{ApiError, DayForecast, ExtremeEvent};
use climacast_geocoding::Place;

pub use forecast_service::{request_extreme, request_forecast};
pub use location_service::{request_locate, LocateError};
pub use search_service::{SearchDebouncer, SearchError};

/// Messages sent from background tasks back to the render loop
#[derive(Debug)]
pub enum ServiceMessage {
    ForecastDone {
        ticket: u64,
        result: Result<Vec<DayForecast>, ApiError>,
    },
    ExtremeDone {
        ticket: u64,
        result: Result<Vec<ExtremeEvent>, ApiError>,
    },
    /// Search results for `term`
    SearchDone {
        term: String,
        result: Result<Vec<Place>, SearchError>,
    },
    LocateDone(Result<Place, LocateError>),
}
