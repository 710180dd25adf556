//! Keystroke sessions: only the most recently issued query may be rendered.
//!
//! Every issued query is stamped with a generation from a shared counter. Issuing a new
//! query makes all earlier ones stale; stale queries stop scanning at their next check and
//! their results are never handed out. Nothing here blocks, and the index itself is only
//! ever read.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tracing::debug;

use crate::{
    index::SymbolIndex,
    normalize::{QueryToken, normalize},
    search::{SearchOptions, SearchResponse},
};

/// Issues queries against a shared index and tracks which one is current.
#[derive(Debug, Clone)]
pub struct QuerySession {
    index: Arc<SymbolIndex>,
    latest: Arc<AtomicU64>,
}

impl QuerySession {
    /// Start a session over a loaded index.
    pub fn new(index: Arc<SymbolIndex>) -> Self {
        Self {
            index,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The index queries run against.
    pub fn index(&self) -> &Arc<SymbolIndex> {
        &self.index
    }

    /// Register a new query, superseding every query issued before it.
    pub fn issue(&self, raw: &str, options: SearchOptions) -> PendingQuery {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        PendingQuery {
            generation,
            query: normalize(raw),
            options,
            index: Arc::clone(&self.index),
            latest: Arc::clone(&self.latest),
        }
    }

    /// Whether `generation` still names the most recent query.
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::Acquire) == generation
    }

    /// Generation of the most recently issued query, `0` before the first.
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}

/// A query that has been issued but not yet run.
///
/// Owns everything it needs, so it can be moved to a worker thread.
#[derive(Debug)]
pub struct PendingQuery {
    generation: u64,
    query: Option<QueryToken>,
    options: SearchOptions,
    index: Arc<SymbolIndex>,
    latest: Arc<AtomicU64>,
}

/// The answer to a query that was still current when it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedQuery {
    /// Generation the query was issued with.
    pub generation: u64,
    /// The shaped results.
    pub response: SearchResponse,
}

impl PendingQuery {
    /// Generation stamped at issue time.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer query has been issued since this one.
    pub fn is_stale(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.generation
    }

    /// Run the query. Returns `None` if it was superseded before, during or right after
    /// the scan.
    pub fn run(self) -> Option<CompletedQuery> {
        if self.is_stale() {
            debug!("Dropping stale query generation {}", self.generation);
            return None;
        }
        let response = match &self.query {
            Some(query) => self
                .index
                .search_until(query, &self.options, || self.is_stale())?,
            None => SearchResponse::default(),
        };
        if self.is_stale() {
            debug!("Discarding result of stale query generation {}", self.generation);
            return None;
        }
        Some(CompletedQuery {
            generation: self.generation,
            response,
        })
    }
}
