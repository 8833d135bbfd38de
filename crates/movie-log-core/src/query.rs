//! Search lifecycle: turns a stream of query edits into at most one live
//! request and a published [`SearchState`].
//!
//! Every new query cancels the request before it. Cancellation and the
//! state write share the watch channel's lock, so a request that finishes
//! after being superseded can never overwrite newer state; it is dropped
//! at the commit point.

use movie_log_models::SearchResult;
use movie_log_sources::MovieSource;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No query long enough to search yet
    Idle,
    Loading { query: String },
    Success { query: String, movies: Vec<SearchResult> },
    Error { query: String, message: String },
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// Results of a successful search, empty in every other state
    pub fn movies(&self) -> &[SearchResult] {
        match self {
            SearchState::Success { movies, .. } => movies,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Loading { query }
            | SearchState::Success { query, .. }
            | SearchState::Error { query, .. } => Some(query),
        }
    }
}

pub struct QueryController<S: MovieSource + ?Sized + 'static> {
    source: Arc<S>,
    min_query_len: usize,
    state: Arc<watch::Sender<SearchState>>,
    in_flight: Option<CancellationToken>,
}

impl<S: MovieSource + ?Sized + 'static> QueryController<S> {
    pub fn new(source: Arc<S>, min_query_len: usize) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            source,
            min_query_len,
            state: Arc::new(state),
            in_flight: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Feed the current query text. Must be called inside a tokio runtime.
    ///
    /// Short queries (trimmed, counted in characters) clear results and
    /// errors without touching the network. Anything else starts a search.
    pub fn set_query(&mut self, query: &str) {
        let query = query.trim().to_string();
        let previous = self.in_flight.take();

        if query.chars().count() < self.min_query_len {
            self.state.send_modify(|state| {
                if let Some(previous) = &previous {
                    previous.cancel();
                }
                *state = SearchState::Idle;
            });
            return;
        }

        let cancel = CancellationToken::new();
        self.state.send_modify(|state| {
            if let Some(previous) = &previous {
                previous.cancel();
            }
            *state = SearchState::Loading { query: query.clone() };
        });
        self.in_flight = Some(cancel.clone());

        let source = self.source.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            let outcome = source.search(&query, &cancel).await;
            let committed = state.send_if_modified(|current| {
                if cancel.is_cancelled() {
                    return false;
                }
                *current = match outcome {
                    Ok(movies) => SearchState::Success { query: query.clone(), movies },
                    Err(e) if e.is_canceled() => return false,
                    Err(e) => SearchState::Error { query: query.clone(), message: e.to_string() },
                };
                true
            });
            if !committed {
                debug!(source = source.source_name(), query = %query, "Discarded superseded search outcome");
            }
        });
    }

    /// Cancel the outstanding search, if any; a pending Loading goes back to Idle
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            self.state.send_if_modified(|state| {
                cancel.cancel();
                if state.is_loading() {
                    *state = SearchState::Idle;
                    true
                } else {
                    false
                }
            });
        }
    }

    /// Wait until the current search (if any) has produced its outcome
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => SearchState::Idle,
        };
        settled
    }
}

impl<S: MovieSource + ?Sized + 'static> Drop for QueryController<S> {
    fn drop(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
    }
}
