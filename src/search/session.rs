use crate::error::ApiError;
use crate::models::{SearchResponse, SearchResult};
use crate::search::render::SearchView;
use crate::search::request::SearchRequest;
use crate::search::strategy::{SearchOption, SearchPreset, SearchStrategy};

/// A submitted search, tagged with the generation it belongs to.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub generation: u64,
    pub request: SearchRequest,
}

/// Client-side search state. Only the response for the most recently
/// issued generation is allowed to change what is displayed.
#[derive(Debug, Clone)]
pub struct SearchSession {
    preset: SearchPreset,
    generation: u64,
    pending_query: Option<String>,
    completed_query: Option<String>,
    loading: bool,
    error: Option<String>,
    results: Vec<SearchResult>,
    ai_response: Option<String>,
}

impl SearchSession {
    pub fn new(preset: SearchPreset) -> Self {
        Self {
            preset,
            generation: 0,
            pending_query: None,
            completed_query: None,
            loading: false,
            error: None,
            results: Vec::new(),
            ai_response: None,
        }
    }

    pub fn preset(&self) -> SearchPreset {
        self.preset
    }

    /// Switching presets never touches the network or the current results.
    pub fn select(&mut self, preset: SearchPreset) {
        self.preset = preset;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submit control should be enabled for `query`.
    pub fn can_submit(&self, query: &str) -> bool {
        !self.loading && !query.trim().is_empty()
    }

    /// Start a search with the selected preset. A blank query yields `None`
    /// and leaves the session untouched. A new ticket supersedes any search
    /// still in flight.
    pub fn begin(&mut self, query: &str, options: Vec<SearchOption>) -> Option<SearchTicket> {
        let strategy = self.preset.strategy(options);
        self.begin_with(query, strategy)
    }

    /// Like [`begin`](Self::begin) with an explicit descriptor instead of
    /// the selected preset.
    pub fn begin_with(&mut self, query: &str, strategy: SearchStrategy) -> Option<SearchTicket> {
        let request = SearchRequest::new(query, strategy)?;
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.pending_query = Some(query.to_string());
        Some(SearchTicket {
            generation: self.generation,
            request,
        })
    }

    /// Apply a response. Returns `false` when the response belongs to a
    /// superseded generation and was discarded.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<SearchResponse, ApiError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Discarding search response for generation {generation}, latest is {}",
                self.generation
            );
            return false;
        }

        self.loading = false;
        self.completed_query = self.pending_query.take();
        match outcome {
            Ok(response) => {
                if let Some(note) = &response.error {
                    tracing::debug!("Engine note on successful search: {note}");
                }
                self.error = None;
                self.results = response.search_results;
                self.ai_response = response.ai_response.filter(|s| !s.trim().is_empty());
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.results.clear();
                self.ai_response = None;
            }
        }
        true
    }

    pub fn view(&self) -> SearchView {
        SearchView::resolve(
            self.error.as_deref(),
            self.loading,
            self.completed_query.as_deref(),
            &self.results,
            self.ai_response.as_deref(),
        )
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SearchPreset::default())
    }
}
