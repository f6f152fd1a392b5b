//! Centralized error types for ClimaCast.
//!
//! Each service crate has its own precise error enum. UI code maps those
//! into [`AppError`], whose `user_message()` is what ends up on screen.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Geocoding(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::SaveFailed(_) => "Could not save your settings.",
        }
    }
}

/// Place search and reverse geocoding errors.
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("No cities found for: {0}")]
    NoResults(String),

    #[error("Reverse geocoding failed: {0}")]
    ReverseFailed(String),
}

impl GeocodingError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeocodingError::SearchFailed(_) => "Search failed. Please try again.",
            GeocodingError::NoResults(_) => "No cities found. Try a different search term.",
            GeocodingError::ReverseFailed(_) => {
                "Could not determine your location. Please search manually."
            }
        }
    }
}

/// Device location errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable")]
    Unavailable,

    #[error("Location request timed out")]
    Timeout,
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Unable to get your location. Please grant location permission."
            }
            LocationError::Unavailable => "Unable to get your location. Location unavailable.",
            LocationError::Timeout => "Unable to get your location. Location request timed out.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = [
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Config(ConfigError::SaveFailed("read-only".into())),
            AppError::Geocoding(GeocodingError::ReverseFailed("timeout".into())),
            AppError::Location(LocationError::Timeout),
        ];

        for err in &errors {
            assert!(!err.user_message().is_empty(), "empty message for {:?}", err);
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = LocationError::PermissionDenied.into();
        assert!(matches!(
            err,
            AppError::Location(LocationError::PermissionDenied)
        ));
    }

    #[test]
    fn test_location_messages_match_dashboard_copy() {
        assert_eq!(
            LocationError::PermissionDenied.user_message(),
            "Unable to get your location. Please grant location permission."
        );
        assert_eq!(
            LocationError::Unavailable.user_message(),
            "Unable to get your location. Location unavailable."
        );
        assert_eq!(
            LocationError::Timeout.user_message(),
            "Unable to get your location. Location request timed out."
        );
    }

    #[test]
    fn test_search_message_propagation() {
        let app_err = AppError::Geocoding(GeocodingError::NoResults("zzz".into()));
        assert_eq!(
            app_err.user_message(),
            "No cities found. Try a different search term."
        );

        let failed = AppError::from(GeocodingError::SearchFailed("500".into()));
        assert_eq!(failed.user_message(), "Search failed. Please try again.");
    }
}
