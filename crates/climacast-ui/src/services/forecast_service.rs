//! Forecast and extreme-weather fetches.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use climacast_forecast::ForecastClient;

use super::ServiceMessage;

/// Fetch a forecast. Sends `ForecastDone` with the given ticket.
pub fn request_forecast(
    tx: &UnboundedSender<ServiceMessage>,
    client: Arc<ForecastClient>,
    token: CancellationToken,
    ticket: u64,
    latitude: f64,
    longitude: f64,
    days: u8,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Forecast fetch cancelled (ticket {})", ticket);
            }
            result = client.get_forecast(latitude, longitude, days) => {
                let _ = tx.send(ServiceMessage::ForecastDone { ticket, result });
            }
        }
    });
}

/// Fetch extreme-weather events. Sends `ExtremeDone` with the given ticket.
pub fn request_extreme(
    tx: &UnboundedSender<ServiceMessage>,
    client: Arc<ForecastClient>,
    token: CancellationToken,
    ticket: u64,
    latitude: f64,
    longitude: f64,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Extreme weather fetch cancelled (ticket {})", ticket);
            }
            result = client.get_extreme_weather(latitude, longitude) => {
                let _ = tx.send(ServiceMessage::ExtremeDone { ticket, result });
            }
        }
    });
}
