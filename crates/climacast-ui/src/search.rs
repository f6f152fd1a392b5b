//! Search box state: input text, suggestion list and inline error.

use climacast_core::{AppError, GeocodingError};
use climacast_geocoding::client::MIN_AUTOCOMPLETE_LEN;
use climacast_geocoding::Place;

use crate::services::SearchError;

/// What the caller should do after the input changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Debounce a search for this term
    Schedule(String),
    /// Term too short; drop any pending search
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub input: String,
    pub suggestions: Vec<Place>,
    pub show_suggestions: bool,
    pub searching: bool,
    pub error: Option<String>,
    pub highlighted: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, c: char) -> SearchAction {
        self.input.push(c);
        self.input_changed()
    }

    pub fn pop_char(&mut self) -> SearchAction {
        self.input.pop();
        self.input_changed()
    }

    fn input_changed(&mut self) -> SearchAction {
        if self.input.chars().count() >= MIN_AUTOCOMPLETE_LEN {
            self.searching = true;
            SearchAction::Schedule(self.input.clone())
        } else {
            self.suggestions.clear();
            self.show_suggestions = false;
            self.searching = false;
            self.error = None;
            SearchAction::Cancel
        }
    }

    /// Apply results for `term`. Returns false when the term is no longer
    /// the current input and the results were dropped.
    pub fn apply_results(&mut self, term: &str, result: Result<Vec<Place>, SearchError>) -> bool {
        if term != self.input {
            tracing::debug!("Dropping stale results for '{}'", term);
            return false;
        }

        self.searching = false;
        self.highlighted = 0;
        match result {
            Ok(places) => {
                self.error = places.is_empty().then(|| {
                    GeocodingError::NoResults(term.to_string())
                        .user_message()
                        .to_string()
                });
                self.suggestions = places;
                self.show_suggestions = true;
            }
            Err(e) => {
                tracing::error!("Search error: {}", e);
                self.error = Some(AppError::from(e).user_message().to_string());
                self.suggestions.clear();
            }
        }
        true
    }

    pub fn highlight_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.suggestions.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }

    /// Take the highlighted suggestion, if the list is showing
    pub fn take_highlighted(&mut self) -> Option<Place> {
        if !self.show_suggestions {
            return None;
        }
        let place = self.suggestions.get(self.highlighted).cloned()?;
        self.accept(&place);
        Some(place)
    }

    /// Put the chosen place in the input and close the list
    pub fn accept(&mut self, place: &Place) {
        self.input = if place.display_name.is_empty() {
            place.name.clone()
        } else {
            place.display_name.clone()
        };
        self.dismiss();
    }

    /// Close the list and clear the error, leaving the input alone
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.show_suggestions = false;
        self.searching = false;
        self.error = None;
        self.highlighted = 0;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.dismiss();
    }

    pub fn begin_locating(&mut self) {
        self.searching = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.searching = false;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            display_name: format!("{}, Maharashtra, India", name),
            lat: 18.52,
            lon: 73.85,
            country: "India".into(),
            country_code: "IN".into(),
            state: "Maharashtra".into(),
            place_type: Some("city".into()),
            importance: Some(0.6),
        }
    }

    fn typed(text: &str) -> (SearchState, SearchAction) {
        let mut state = SearchState::new();
        let mut action = SearchAction::Cancel;
        for c in text.chars() {
            action = state.push_char(c);
        }
        (state, action)
    }

    #[test]
    fn short_input_cancels() {
        let (state, action) = typed("Pu");
        assert_eq!(action, SearchAction::Cancel);
        assert!(!state.searching);
    }

    #[test]
    fn three_chars_schedule_a_search() {
        let (state, action) = typed("Pun");
        assert_eq!(action, SearchAction::Schedule("Pun".into()));
        assert!(state.searching);
    }

    #[test]
    fn deleting_below_threshold_clears_suggestions_and_error() {
        let (mut state, _) = typed("Pune");
        state.apply_results("Pune", Err(SearchError::Failed("boom".into())));
        assert!(state.error.is_some());

        state.pop_char();
        assert_eq!(state.pop_char(), SearchAction::Cancel);

        assert!(state.error.is_none());
        assert!(state.suggestions.is_empty());
        assert!(!state.show_suggestions);
    }

    #[test]
    fn results_populate_suggestions() {
        let (mut state, _) = typed("Pune");
        assert!(state.apply_results("Pune", Ok(vec![place("Pune")])));

        assert!(state.show_suggestions);
        assert!(!state.searching);
        assert!(state.error.is_none());
        assert_eq!(state.suggestions.len(), 1);
    }

    #[test]
    fn empty_results_show_no_cities_message() {
        let (mut state, _) = typed("Qqqq");
        state.apply_results("Qqqq", Ok(Vec::new()));
        assert_eq!(
            state.error.as_deref(),
            Some("No cities found. Try a different search term.")
        );
    }

    #[test]
    fn failure_shows_search_failed() {
        let (mut state, _) = typed("Pune");
        state.apply_results("Pune", Err(SearchError::RateLimited));
        assert_eq!(state.error.as_deref(), Some("Search failed. Please try again."));
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn stale_results_are_dropped() {
        let (mut state, _) = typed("Pune");
        assert!(!state.apply_results("Pun", Ok(vec![place("Punalur")])));
        assert!(state.suggestions.is_empty());
        assert!(state.searching);
    }

    #[test]
    fn selecting_a_suggestion_fills_input() {
        let (mut state, _) = typed("Pune");
        state.apply_results("Pune", Ok(vec![place("Pune"), place("Pune Cantonment")]));
        state.highlight_next();

        let chosen = state.take_highlighted().unwrap();

        assert_eq!(chosen.name, "Pune Cantonment");
        assert_eq!(state.input, "Pune Cantonment, Maharashtra, India");
        assert!(!state.show_suggestions);
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let (mut state, _) = typed("Pune");
        state.apply_results("Pune", Ok(vec![place("A"), place("B")]));

        state.highlight_prev();
        assert_eq!(state.highlighted, 1);
        state.highlight_next();
        assert_eq!(state.highlighted, 0);
    }

    #[test]
    fn clear_empties_everything() {
        let (mut state, _) = typed("Pune");
        state.apply_results("Pune", Ok(vec![place("Pune")]));

        state.clear();

        assert!(state.input.is_empty());
        assert!(state.suggestions.is_empty());
        assert!(!state.show_suggestions);
    }
}
