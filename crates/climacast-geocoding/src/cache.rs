//! In-memory response cache in front of the Nominatim client.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::client::{NominatimClient, DEFAULT_SEARCH_LIMIT, MIN_AUTOCOMPLETE_LEN};
use crate::error::GeocodeError;
use crate::types::{Place, Suggestion};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// String-keyed cache whose entries expire `ttl` after insertion
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.lock();
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`. Expired entries are dropped first.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        if entries.len() < before {
            tracing::debug!("Purged {} expired cache entries", before - entries.len());
        }

        entries.insert(
            key.into(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn search_key(query: &str, limit: usize) -> String {
    format!("search_{}_{}", query, limit)
}

fn reverse_key(lat: f64, lon: f64) -> String {
    format!("reverse_{:.4}_{:.4}", lat, lon)
}

/// Nominatim client with cached search and reverse lookups.
///
/// Cache hits skip the rate limiter entirely. Failures are not cached.
#[derive(Debug)]
pub struct CachedGeocoder {
    client: NominatimClient,
    searches: TtlCache<Vec<Place>>,
    reverse: TtlCache<Place>,
}

impl CachedGeocoder {
    pub fn new(client: NominatimClient, ttl: Duration) -> Self {
        Self {
            client,
            searches: TtlCache::new(ttl),
            reverse: TtlCache::new(ttl),
        }
    }

    pub async fn search_cities(&self, query: &str, limit: usize) -> Result<Vec<Place>, GeocodeError> {
        let key = search_key(query, limit);
        if let Some(places) = self.searches.get(&key) {
            tracing::debug!("Using cached result for: {}", query);
            return Ok(places);
        }

        let places = self.client.search_cities(query, limit).await?;
        self.searches.insert(key, places.clone());
        Ok(places)
    }

    pub async fn get_city_name(&self, lat: f64, lon: f64) -> Result<Place, GeocodeError> {
        let key = reverse_key(lat, lon);
        if let Some(place) = self.reverse.get(&key) {
            tracing::debug!("Using cached result for: {}, {}", lat, lon);
            return Ok(place);
        }

        let place = self.client.get_city_name(lat, lon).await?;
        self.reverse.insert(key, place.clone());
        Ok(place)
    }

    pub async fn get_coordinates(&self, city: &str) -> Result<Option<Place>, GeocodeError> {
        let results = self.search_cities(city, 1).await?;
        Ok(results.into_iter().next())
    }

    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        if query.trim().chars().count() < MIN_AUTOCOMPLETE_LEN {
            return Ok(Vec::new());
        }
        let places = self.search_cities(query, DEFAULT_SEARCH_LIMIT).await?;
        Ok(places.into_iter().map(Suggestion::from).collect())
    }

    pub fn client(&self) -> &NominatimClient {
        &self.client
    }
}
