use serde::{Deserialize, Serialize};

/// Place types accepted from a forward search
const SETTLEMENT_TYPES: [&str; 5] = ["city", "town", "village", "municipality", "county"];

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    /// ISO country code, upper-case
    pub country_code: String,
    /// State, falling back to county; empty when neither is known
    pub state: String,
    #[serde(default)]
    pub place_type: Option<String>,
    /// Nominatim's relevance score
    #[serde(default)]
    pub importance: Option<f64>,
}

impl Place {
    /// "State, Country" line for suggestion lists, if a state is known
    pub fn region_line(&self) -> Option<String> {
        if self.state.is_empty() {
            return None;
        }
        if self.country.is_empty() {
            Some(self.state.clone())
        } else {
            Some(format!("{}, {}", self.state, self.country))
        }
    }
}

/// Autocomplete entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub place: Place,
    /// Dropdown text
    pub label: String,
    /// Form value
    pub value: String,
}

impl From<Place> for Suggestion {
    fn from(place: Place) -> Self {
        Self {
            label: place.display_name.clone(),
            value: place.name.clone(),
            place,
        }
    }
}

/// Device coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Nominatim returns coordinates as strings; some mirrors return numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCoord {
    Text(String),
    Number(f64),
}

impl RawCoord {
    fn value(&self) -> Option<f64> {
        match self {
            RawCoord::Text(s) => s.trim().parse().ok(),
            RawCoord::Number(n) => Some(*n),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct NominatimAddress {
    country: Option<String>,
    country_code: Option<String>,
    state: Option<String>,
    county: Option<String>,
}

/// One entry of a `/search` response, or the body of a `/reverse` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NominatimPlace {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: String,
    lat: RawCoord,
    lon: RawCoord,
    #[serde(rename = "type", default)]
    place_type: Option<String>,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    addresstype: Option<String>,
    #[serde(default)]
    importance: Option<f64>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

impl NominatimPlace {
    /// Cities, towns, villages and similar; drops roads, shops, buildings.
    pub(crate) fn is_settlement(&self) -> bool {
        let typed = self
            .place_type
            .as_deref()
            .is_some_and(|t| SETTLEMENT_TYPES.contains(&t));
        let place_class = self.class.as_deref() == Some("place");
        let city_address = matches!(self.addresstype.as_deref(), Some("city") | Some("town"));
        typed || place_class || city_address
    }

    /// Convert to a `Place`; `None` if the coordinates do not parse.
    pub(crate) fn into_place(self) -> Option<Place> {
        let lat = self.lat.value()?;
        let lon = self.lon.value()?;

        let name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| first_component(&self.display_name));

        let address = self.address.unwrap_or_default();
        let state = address
            .state
            .filter(|s| !s.is_empty())
            .or(address.county)
            .unwrap_or_default();

        Some(Place {
            name,
            display_name: self.display_name,
            lat,
            lon,
            country: address.country.unwrap_or_default(),
            country_code: address
                .country_code
                .map(|c| c.to_uppercase())
                .unwrap_or_default(),
            state,
            place_type: self.place_type,
            importance: self.importance,
        })
    }
}

fn first_component(display_name: &str) -> String {
    display_name
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Highest importance first; missing scores rank as zero. Stable.
pub(crate) fn sort_by_relevance(places: &mut [Place]) {
    places.sort_by(|a, b| {
        b.importance
            .unwrap_or(0.0)
            .total_cmp(&a.importance.unwrap_or(0.0))
    });
}
