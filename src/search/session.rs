use super::{SearchOptions, SearchResult, search};
use crate::debounce::Debouncer;
use crate::section::Document;
use std::time::{Duration, Instant};
use tracing::debug;

/// A query that survived the debounce window, stamped with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: u64,
    pub query: String,
}

/// Search-as-you-type: input is debounced, each fired query gets a
/// monotonically increasing token, and results for anything but the newest
/// token are discarded.
#[derive(Debug)]
pub struct SearchSession {
    debouncer: Debouncer,
    options: SearchOptions,
    pending: Option<String>,
    latest: u64,
    results: Vec<SearchResult>,
}

impl SearchSession {
    pub fn new(delay: Duration, options: SearchOptions) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            options,
            pending: None,
            latest: 0,
            results: Vec::new(),
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Record keystrokes. Short queries clear the results immediately and
    /// never fire.
    pub fn input(&mut self, query: &str, now: Instant) {
        let query = query.trim();
        if query.chars().count() < self.options.min_query_len {
            self.debouncer.cancel();
            self.pending = None;
            // Supersede anything already in flight.
            self.latest += 1;
            self.results.clear();
            return;
        }
        self.pending = Some(query.to_string());
        self.debouncer.schedule(now);
    }

    /// The request to run, once the input has been idle for the delay.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let query = self.pending.take()?;
        self.latest += 1;
        Some(SearchRequest {
            token: self.latest,
            query,
        })
    }

    /// Apply results for `request`. Returns `false` and keeps the current
    /// results when a newer request has been issued since.
    pub fn complete(
        &mut self,
        request: &SearchRequest,
        results: Vec<SearchResult>,
    ) -> bool {
        if request.token != self.latest {
            debug!(
                token = request.token,
                latest = self.latest,
                query = %request.query,
                "dropping stale search results"
            );
            return false;
        }
        self.results = results;
        true
    }

    /// Poll and, if a request fires, run it synchronously over `documents`.
    pub fn run(&mut self, now: Instant, documents: &[Document]) -> bool {
        match self.poll(now) {
            Some(request) => {
                let results = search(&request.query, documents, &self.options);
                self.complete(&request, results)
            }
            None => false,
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }
}
