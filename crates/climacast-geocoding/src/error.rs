use thiserror::Error;

/// Device location errors
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Geocoding errors
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limit exceeded, wait before making more requests")]
    RateLimited,

    #[error("Nominatim returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to get city name from coordinates: {0}")]
    ReverseFailed(String),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}
