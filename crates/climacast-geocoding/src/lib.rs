//! Place lookup for ClimaCast
//!
//! Forward and reverse geocoding via Nominatim (OpenStreetMap), with an
//! in-memory response cache and a shared one-request-per-second limiter.
//! Also provides the preset city list and approximate device location.

pub mod cache;
pub mod client;
pub mod error;
pub mod location;
pub mod presets;
pub mod rate_limit;
pub mod types;

pub use cache::{CachedGeocoder, TtlCache};
pub use client::{NominatimClient, NominatimSettings};
pub use error::{GeocodeError, LocationError};
pub use location::{use_my_location, IpLocator};
pub use presets::{find_preset, PresetCity, POPULAR_CITIES};
pub use rate_limit::RateLimiter;
pub use types::*;
