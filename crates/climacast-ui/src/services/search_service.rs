//! Debounced city search.
//!
//! Each keystroke reschedules the search; only a term that stays unchanged
//! for the debounce delay reaches the geocoder.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use climacast_geocoding::client::DEFAULT_SEARCH_LIMIT;
use climacast_geocoding::{CachedGeocoder, GeocodeError};

use super::ServiceMessage;

/// Error type for search operations
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    RateLimited,
    Failed(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::RateLimited => write!(f, "Search rate limited"),
            SearchError::Failed(s) => write!(f, "Search failed: {}", s),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<GeocodeError> for SearchError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::RateLimited => SearchError::RateLimited,
            other => SearchError::Failed(other.to_string()),
        }
    }
}

pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending search with one for `term`.
    ///
    /// `parent` is the service shutdown token; the scheduled search is a child
    /// of it so shutdown cancels it too.
    pub fn schedule(
        &mut self,
        tx: &UnboundedSender<ServiceMessage>,
        geocoder: Arc<CachedGeocoder>,
        parent: &CancellationToken,
        term: String,
    ) {
        self.cancel();

        let token = parent.child_token();
        self.pending = Some(token.clone());

        let tx = tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Search for '{}' superseded", term);
                }
                _ = tokio::time::sleep(delay) => {
                    let result = geocoder
                        .search_cities(&term, DEFAULT_SEARCH_LIMIT)
                        .await
                        .map_err(SearchError::from);
                    let _ = tx.send(ServiceMessage::SearchDone { term, result });
                }
            }
        });
    }

    /// Drop the pending search, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climacast_geocoding::cache::DEFAULT_TTL;
    use climacast_geocoding::{NominatimClient, NominatimSettings};
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder_for(server: &MockServer) -> Arc<CachedGeocoder> {
        let client = NominatimClient::new(NominatimSettings {
            base_url: server.uri(),
            min_request_interval: Duration::from_millis(1),
            ..NominatimSettings::default()
        })
        .unwrap();
        Arc::new(CachedGeocoder::new(client, DEFAULT_TTL))
    }

    fn city(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name, "display_name": format!("{}, India", name),
            "lat": "19.07", "lon": "72.87", "type": "city", "importance": 0.7
        })
    }

    #[tokio::test]
    async fn only_last_term_is_searched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Mumbai"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([city("Mumbai")])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Mumb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let geocoder = geocoder_for(&server);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let root = CancellationToken::new();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(50));

        debouncer.schedule(&tx, geocoder.clone(), &root, "Mumb".into());
        debouncer.schedule(&tx, geocoder, &root, "Mumbai".into());

        match rx.recv().await {
            Some(ServiceMessage::SearchDone { term, result }) => {
                assert_eq!(term, "Mumbai");
                assert_eq!(result.unwrap()[0].name, "Mumbai");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn cancel_clears_pending() {
        let mut debouncer = SearchDebouncer::new(Duration::from_secs(60));
        let server = MockServer::start().await;
        let (tx, _rx) = mpsc::unbounded_channel();
        let root = CancellationToken::new();

        debouncer.schedule(&tx, geocoder_for(&server), &root, "Tokyo".into());
        assert!(debouncer.is_pending());

        debouncer.cancel();
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn shutdown_cancels_scheduled_search() {
        let mut debouncer = SearchDebouncer::new(Duration::from_secs(60));
        let server = MockServer::start().await;
        let (tx, _rx) = mpsc::unbounded_channel();
        let root = CancellationToken::new();

        debouncer.schedule(&tx, geocoder_for(&server), &root, "Tokyo".into());
        root.cancel();

        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rate_limit_is_kept_apart() {
        assert_eq!(SearchError::from(GeocodeError::RateLimited), SearchError::RateLimited);
        assert!(matches!(
            SearchError::from(GeocodeError::Parse("bad json".into())),
            SearchError::Failed(_)
        ));
    }
}
