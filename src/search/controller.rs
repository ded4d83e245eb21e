//! Search view controller
//!
//! Owns the search state, the result set of the last completed search and
//! the elapsed-time ticker. Sorted and paginated views are derived on read.

use super::models::{SearchRequest, SearchToggles};
use super::state::SearchState;
use super::timer::{SearchTimer, TICK};
use crate::config::{SearchSettings, Settings};
use crate::network::{ApiClient, ClientError, SearchApi};
use crate::results::{sort_results, Pagination, RemoteConfig, ResultItem, SearchPayload, SortMode, Stats};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, timeout, Instant};
use tracing::{debug, info, warn};

/// A search that has started but not yet completed
#[derive(Debug, Clone)]
pub struct PendingSearch {
    generation: u64,
    request: SearchRequest,
}

impl PendingSearch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Controller behind the search view.
///
/// Dropping the controller aborts any running ticker.
pub struct SearchController<A: SearchApi = ApiClient> {
    api: A,
    state: SearchState,
    results: Vec<ResultItem>,
    current_page: usize,
    recommended_queries: Vec<String>,
    stats: Option<Stats>,
    last_error: Option<String>,
    timer: SearchTimer,
    generation: u64,
    in_flight: Option<u64>,
    request_timeout: Duration,
}

impl SearchController<ApiClient> {
    /// Controller talking HTTP to the configured API
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let api = ApiClient::with_settings(&settings.api)?;
        Ok(Self::new(api, &settings.search).with_timeout(settings.api.timeout()))
    }
}

impl<A: SearchApi> SearchController<A> {
    pub fn new(api: A, settings: &SearchSettings) -> Self {
        Self {
            api,
            state: SearchState::from_settings(settings),
            results: Vec::new(),
            current_page: 1,
            recommended_queries: Vec::new(),
            stats: None,
            last_error: None,
            timer: SearchTimer::new(),
            generation: 0,
            in_flight: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Upper bound for every outbound request
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Load recommended queries and corpus statistics.
    ///
    /// Both requests run concurrently and neither failure affects the other.
    pub async fn initialize(&mut self) {
        let (config, stats) = futures::join!(
            bounded(self.request_timeout, self.api.config()),
            bounded(self.request_timeout, self.api.stats()),
        );

        self.recommended_queries = match config {
            Ok(config) => config.recommended_queries,
            Err(e) => {
                warn!("Error loading config: {}", e);
                RemoteConfig::fallback().recommended_queries
            }
        };

        self.stats = match stats {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Error loading stats: {}", e);
                None
            }
        };

        info!(
            "Initialized with {} recommended queries",
            self.recommended_queries.len()
        );
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Run a search for `query`. Blank queries are ignored and return `false`.
    pub async fn submit_search(&mut self, query: &str) -> bool {
        self.submit_search_with_progress(query, |_| {}).await
    }

    /// Like [`submit_search`](Self::submit_search), reporting the formatted
    /// elapsed time to `on_tick` every tick while the request is pending.
    pub async fn submit_search_with_progress<F>(&mut self, query: &str, mut on_tick: F) -> bool
    where
        F: FnMut(&str),
    {
        let Some(pending) = self.begin_search(query) else {
            return false;
        };

        let outcome = {
            let call = bounded(self.request_timeout, self.api.search(pending.request()));
            tokio::pin!(call);
            let mut redraw = interval_at(Instant::now() + TICK, TICK);
            loop {
                tokio::select! {
                    outcome = &mut call => break outcome,
                    _ = redraw.tick() => on_tick(&self.timer.formatted()),
                }
            }
        };

        self.complete_search(pending, outcome)
    }

    /// Fill in a recommended query and run it
    pub async fn search_with_suggestion(&mut self, query: &str) -> bool {
        self.search_with_suggestion_with_progress(query, |_| {}).await
    }

    /// Like [`search_with_suggestion`](Self::search_with_suggestion), with a
    /// per-tick elapsed-time callback.
    pub async fn search_with_suggestion_with_progress<F>(&mut self, query: &str, on_tick: F) -> bool
    where
        F: FnMut(&str),
    {
        self.set_query(query);
        let query = self.state.query.clone();
        self.submit_search_with_progress(&query, on_tick).await
    }

    /// Start a search without waiting for the response.
    ///
    /// Supersedes any search already in flight: its ticker is replaced and
    /// its eventual completion will be ignored.
    pub fn begin_search(&mut self, query: &str) -> Option<PendingSearch> {
        if query.trim().is_empty() {
            return None;
        }

        self.state.query = query.to_string();
        self.state.has_searched = true;
        self.state.loading = true;
        self.current_page = 1;
        self.last_error = None;
        self.timer.start();

        self.generation += 1;
        self.in_flight = Some(self.generation);

        let request = self.state.request();
        info!("Searching '{}' via /{}", request.query(), request.endpoint());

        Some(PendingSearch {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of a search started with [`begin_search`](Self::begin_search).
    ///
    /// Returns `false` if the search was superseded or cleared meanwhile.
    pub fn complete_search(
        &mut self,
        pending: PendingSearch,
        outcome: Result<SearchPayload, ClientError>,
    ) -> bool {
        if self.in_flight != Some(pending.generation) {
            debug!(
                "Discarding stale response for '{}' (generation {})",
                pending.request.query(),
                pending.generation
            );
            return false;
        }

        self.in_flight = None;
        self.timer.stop();
        self.state.loading = false;
        self.current_page = 1;

        match outcome {
            Ok(payload) => {
                let (results, cache_info) = payload.into_parts();
                info!(
                    "Search '{}' returned {} results in {}s",
                    pending.request.query(),
                    results.len(),
                    self.timer.formatted()
                );
                self.results = results;
                self.state.cache_info = cache_info;
            }
            Err(e) => {
                warn!("Error searching '{}': {}", pending.request.query(), e);
                self.results.clear();
                self.state.cache_info = None;
                self.last_error = Some(e.to_string());
            }
        }

        true
    }

    /// Return to the initial empty view, abandoning any search in flight
    pub fn clear_search(&mut self) {
        self.timer.reset();
        self.in_flight = None;
        self.state.query.clear();
        self.state.has_searched = false;
        self.state.loading = false;
        self.state.cache_info = None;
        self.results.clear();
        self.current_page = 1;
        self.last_error = None;
    }

    /// Stop background activity before the view goes away
    pub fn shutdown(&mut self) {
        self.timer.stop();
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.results.len())
    }

    /// Jump to a page; out-of-range pages are ignored
    pub fn set_page(&mut self, page: usize) -> bool {
        if self.pagination().contains(page) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.pagination().has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.pagination().has_prev() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.state.sort_mode = mode;
        self.current_page = 1;
    }

    /// Select or deselect an indexing field. Returns whether it is now selected.
    pub fn toggle_indexing_field(&mut self, field: &str) -> bool {
        self.state.toggle_indexing_field(field)
    }

    pub fn toggles_mut(&mut self) -> &mut SearchToggles {
        &mut self.state.toggles
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Results in fetch order
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Results in the selected sort order
    pub fn sorted_results(&self) -> Vec<&ResultItem> {
        sort_results(&self.results, self.state.sort_mode)
    }

    /// The current page of sorted results
    pub fn paginated_results(&self) -> Vec<&ResultItem> {
        let sorted = self.sorted_results();
        self.pagination().page(&sorted).to_vec()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.timer.elapsed_seconds()
    }

    pub fn formatted_elapsed(&self) -> String {
        self.timer.formatted()
    }

    pub fn recommended_queries(&self) -> &[String] {
        &self.recommended_queries
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn cache_info(&self) -> Option<&str> {
        self.state.cache_info.as_deref()
    }

    /// Why the last search failed, if it did.
    ///
    /// A failed search shows the same empty result list as a search with no
    /// hits; this is the only place the two differ.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn has_searched(&self) -> bool {
        self.state.has_searched
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_running()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Apply the controller's request timeout to an API call
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    timeout(limit, call).await.unwrap_or(Err(ClientError::Timeout))
}
