//! Query execution and result shaping.
#![allow(clippy::missing_docs_in_private_items)]

use serde::Serialize;
use tracing::debug;

use crate::{
    category::SymbolCategory,
    index::{Entry, Occurrence, SymbolIndex},
    normalize::{QueryToken, normalize},
    rank::{GroupBy, group, rank},
};

/// Default cap on returned entries.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// How often, in scanned entries, a cancellable search checks whether it is still wanted.
const CANCEL_CHECK_INTERVAL: usize = 64;

/// Options that control how a query is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of entries returned.
    pub max_results: usize,
    /// Display clustering of the ranked entries.
    pub group_by: GroupBy,
    /// Categories to search; defaults to all of them.
    pub categories: SymbolCategory,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            group_by: GroupBy::default(),
            categories: SymbolCategory::default(),
        }
    }
}

impl SearchOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of returned entries.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Select how results are clustered.
    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Toggle scope grouping; `false` yields a single flat group.
    pub fn with_group_by_scope(self, group_by_scope: bool) -> Self {
        self.with_group_by(if group_by_scope {
            GroupBy::Scope
        } else {
            GroupBy::None
        })
    }

    /// Restrict the search to the given categories. An empty set selects all of them.
    pub fn with_categories(mut self, categories: SymbolCategory) -> Self {
        self.categories = if categories.is_empty() {
            SymbolCategory::all()
        } else {
            categories
        };
        self
    }
}

/// One destination of a result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultOccurrence {
    /// Opaque destination for the renderer.
    pub reference: String,
    /// Qualifying context.
    pub scope_label: String,
    /// Whether the link opens in the parent frame.
    pub opens_in_parent: bool,
}

impl From<&Occurrence> for ResultOccurrence {
    fn from(occurrence: &Occurrence) -> Self {
        Self {
            reference: occurrence.reference.clone(),
            scope_label: occurrence.scope_label.clone(),
            opens_in_parent: occurrence.opens_in_parent,
        }
    }
}

/// A matched symbol with its destinations in load order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    /// Display name.
    pub label: String,
    /// Category label of the entry.
    pub category: &'static str,
    /// Destinations, never reordered.
    pub occurrences: Vec<ResultOccurrence>,
}

impl From<&Entry> for ResultEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            label: entry.label.clone(),
            category: entry.category.label(),
            occurrences: entry.occurrences.iter().map(ResultOccurrence::from).collect(),
        }
    }
}

/// A display cluster of ranked entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultGroup {
    /// Cluster label: a scope label, a category label, or empty when ungrouped.
    pub scope_label: String,
    /// Entries in rank order.
    pub entries: Vec<ResultEntry>,
}

/// Bounded, ranked and grouped answer to one query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Normalized query, or `None` when the input held nothing searchable.
    pub query: Option<String>,
    /// Result clusters.
    pub groups: Vec<ResultGroup>,
    /// Number of entries across all groups.
    pub total: usize,
    /// Whether more matches exist beyond `max_results`.
    pub has_more: bool,
}

impl SearchResponse {
    /// Whether the response holds no entries.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate over entries in rank order within each group.
    pub fn entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.groups.iter().flat_map(|group| group.entries.iter())
    }
}

impl SymbolIndex {
    /// Answer a raw query.
    ///
    /// Empty or punctuation-only input yields an empty response rather than an error.
    pub fn search(&self, raw: &str, options: &SearchOptions) -> SearchResponse {
        match normalize(raw) {
            Some(query) => self.search_token(&query, options),
            None => SearchResponse::default(),
        }
    }

    /// Answer an already normalized query.
    pub fn search_token(&self, query: &QueryToken, options: &SearchOptions) -> SearchResponse {
        self.search_until(query, options, || false)
            .unwrap_or_default()
    }

    /// Answer a normalized query, abandoning the scan once `cancelled` reports true.
    ///
    /// Returns `None` when cancelled.
    pub fn search_until(
        &self,
        query: &QueryToken,
        options: &SearchOptions,
        cancelled: impl Fn() -> bool,
    ) -> Option<SearchResponse> {
        let mut matched: Vec<&Entry> = Vec::new();
        let mut has_more = false;
        for (scanned, entry) in self.prefix_scan(query).enumerate() {
            if scanned % CANCEL_CHECK_INTERVAL == 0 && cancelled() {
                return None;
            }
            if !options.categories.contains(entry.category) {
                continue;
            }
            if matched.len() == options.max_results {
                has_more = true;
                break;
            }
            matched.push(entry);
        }

        rank(query, &mut matched);
        let groups: Vec<ResultGroup> = group(&matched, options.group_by)
            .into_iter()
            .map(|(scope_label, entries)| ResultGroup {
                scope_label,
                entries: entries.into_iter().map(ResultEntry::from).collect(),
            })
            .collect();

        debug!(
            "Query {:?} matched {} entries in {} groups (more: {})",
            query.as_str(),
            matched.len(),
            groups.len(),
            has_more
        );

        Some(SearchResponse {
            query: Some(query.as_str().to_string()),
            groups,
            total: matched.len(),
            has_more,
        })
    }
}
