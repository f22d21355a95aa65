//! Single-flight text search

use crate::controllers::EngineEvent;
use crate::providers::{ProviderError, SearchProvider, SearchResult};
use crate::runtime::AsyncSpawner;
use crossbeam_channel::Sender;
use serde::Serialize;
use std::sync::Arc;

/// A provider failure surfaced to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFailure {
    pub message: String,
    pub retryable: bool,
}

/// Where the current search session stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SearchPhase {
    Idle,
    InFlight,
    Failed(SearchFailure),
}

/// Runs text searches against the injected provider.
///
/// Searches are single-flight with last-submitted-wins semantics: each
/// `submit` bumps a monotonically increasing generation, and a completion is
/// applied only while its generation is still the latest one issued. Older
/// in-flight calls are not aborted; their results are simply discarded on
/// arrival. No queueing, nothing blocks the caller.
pub struct SearchController {
    generation: u64,
    query: String,
    results: Vec<SearchResult>,
    phase: SearchPhase,
    provider: Arc<dyn SearchProvider>,
    events: Sender<EngineEvent>,
    spawner: Arc<dyn AsyncSpawner>,
}

impl SearchController {
    pub(crate) fn new(
        provider: Arc<dyn SearchProvider>,
        spawner: Arc<dyn AsyncSpawner>,
        events: Sender<EngineEvent>,
    ) -> Self {
        Self {
            generation: 0,
            query: String::new(),
            results: Vec::new(),
            phase: SearchPhase::Idle,
            provider,
            events,
            spawner,
        }
    }

    /// Issues a search for `query`. Blank input is a no-op.
    ///
    /// Returns whether a provider call was actually issued.
    pub fn submit(&mut self, query: &str) -> bool {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            log::debug!("ignoring blank search query");
            return false;
        }

        self.generation += 1;
        let generation = self.generation;
        self.query = trimmed.to_string();
        self.phase = SearchPhase::InFlight;

        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        let owned_query = self.query.clone();
        self.spawner.spawn_boxed(Box::pin(async move {
            let outcome = provider.search(&owned_query).await;
            // The engine may be gone by the time a slow search lands
            let _ = events.send(EngineEvent::SearchCompleted {
                generation,
                outcome,
            });
        }));

        true
    }

    /// Applies a provider completion, discarding it when superseded.
    ///
    /// Returns whether the completion was applied.
    pub(crate) fn apply_completion(
        &mut self,
        generation: u64,
        outcome: Result<Vec<SearchResult>, ProviderError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "discarding search completion: {}",
                crate::EngineError::StaleAsyncResult {
                    received: generation,
                    current: self.generation,
                }
            );
            return false;
        }

        match outcome {
            Ok(results) => {
                self.results = results;
                self.phase = SearchPhase::Idle;
            }
            Err(error) => {
                // Keep the query text so the user can retry in place
                self.results.clear();
                self.phase = SearchPhase::Failed(SearchFailure {
                    message: error.to_string(),
                    retryable: error.is_retryable(),
                });
            }
        }
        true
    }

    /// Takes the result at `index` and clears the result list
    pub fn take_result(&mut self, index: usize) -> Option<SearchResult> {
        if index >= self.results.len() {
            return None;
        }
        let chosen = self.results.swap_remove(index);
        self.results.clear();
        self.phase = SearchPhase::Idle;
        Some(chosen)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::InFlight
    }

    pub fn failure(&self) -> Option<&SearchFailure> {
        match &self.phase {
            SearchPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}
