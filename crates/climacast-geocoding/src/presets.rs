//! Popular cities for quick access. Coordinates are fixed, so selecting one
//! never hits the geocoder.

use crate::types::Place;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetCity {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub country: &'static str,
}

impl PresetCity {
    pub fn to_place(&self) -> Place {
        Place {
            name: self.name.to_string(),
            display_name: format!("{}, {}", self.name, self.country),
            lat: self.lat,
            lon: self.lon,
            country: self.country.to_string(),
            country_code: String::new(),
            state: String::new(),
            place_type: Some("city".to_string()),
            importance: None,
        }
    }
}

pub const POPULAR_CITIES: [PresetCity; 8] = [
    PresetCity { name: "Delhi", lat: 28.6139, lon: 77.2090, country: "India" },
    PresetCity { name: "Mumbai", lat: 19.0760, lon: 72.8777, country: "India" },
    PresetCity { name: "Bangalore", lat: 12.9716, lon: 77.5946, country: "India" },
    PresetCity { name: "Chennai", lat: 13.0827, lon: 80.2707, country: "India" },
    PresetCity { name: "New York", lat: 40.7128, lon: -74.0060, country: "USA" },
    PresetCity { name: "London", lat: 51.5074, lon: -0.1278, country: "UK" },
    PresetCity { name: "Tokyo", lat: 35.6762, lon: 139.6503, country: "Japan" },
    PresetCity { name: "Sydney", lat: -33.8688, lon: 151.2093, country: "Australia" },
];

/// Case-insensitive lookup by city name
pub fn find_preset(name: &str) -> Option<&'static PresetCity> {
    let name = name.trim();
    POPULAR_CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name))
}
