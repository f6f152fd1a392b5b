use crate::services::SearchError;
use climacast_core::{AppError, GeocodingError};

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::RateLimited => {
                AppError::Geocoding(GeocodingError::SearchFailed("rate limited".into()))
            }
            SearchError::Failed(s) => AppError::Geocoding(GeocodingError::SearchFailed(s)),
        }
    }
}
