use crate::services::LocateError;
use climacast_core::{AppError, GeocodingError, LocationError};
use climacast_geocoding::LocationError as DeviceError;

impl From<LocateError> for AppError {
    fn from(e: LocateError) -> Self {
        match e {
            LocateError::Device(DeviceError::PermissionDenied) => {
                AppError::Location(LocationError::PermissionDenied)
            }
            LocateError::Device(DeviceError::Timeout) => AppError::Location(LocationError::Timeout),
            LocateError::Device(DeviceError::ServiceUnavailable | DeviceError::Other(_)) => {
                AppError::Location(LocationError::Unavailable)
            }
            LocateError::Reverse(s) => AppError::Geocoding(GeocodingError::ReverseFailed(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_errors_use_location_copy() {
        let err = AppError::from(LocateError::Device(DeviceError::PermissionDenied));
        assert_eq!(
            err.user_message(),
            "Unable to get your location. Please grant location permission."
        );

        let err = AppError::from(LocateError::Device(DeviceError::Other("tls".into())));
        assert_eq!(
            err.user_message(),
            "Unable to get your location. Location unavailable."
        );
    }

    #[test]
    fn reverse_errors_ask_for_manual_search() {
        let err = AppError::from(LocateError::Reverse("ocean".into()));
        assert_eq!(
            err.user_message(),
            "Could not determine your location. Please search manually."
        );
    }
}
