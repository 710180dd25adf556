//! The immutable symbol table and its prefix lookup.

use std::collections::HashSet;

use tracing::info;

use crate::{
    category::{SymbolCategory, describe_categories},
    error::{Result, SymdexError},
    normalize::QueryToken,
};

/// Tables at or below this size locate the prefix range with a linear search.
pub const LINEAR_SCAN_THRESHOLD: usize = 32;

/// One concrete destination for an entry, such as a single overload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Opaque destination handed to the renderer, usually a URL fragment.
    pub reference: String,
    /// Qualifying context, e.g. the owning namespace or class.
    pub scope_label: String,
    /// Whether the link should open in the parent frame.
    pub opens_in_parent: bool,
}

/// One indexed symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw keyed identifier from the payload. Unique within a category.
    pub id: String,
    /// Normalized lookup key.
    pub key: String,
    /// Disambiguating suffix split off the raw key.
    pub ordinal: Option<u64>,
    /// Display name.
    pub label: String,
    /// Table the entry was loaded from.
    pub category: SymbolCategory,
    /// Destinations in discovery order. Never empty.
    pub occurrences: Vec<Occurrence>,
}

/// Index of symbol entries, sorted by key for prefix search.
///
/// Built once through [`IndexBuilder`] and never mutated afterwards, so a shared reference
/// can serve any number of concurrent queries.
#[derive(Debug, Default, Clone)]
pub struct SymbolIndex {
    entries: Vec<Entry>,
}

impl SymbolIndex {
    /// Build an index directly from validated entries, preserving their relative order on
    /// equal keys.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        let mut builder = IndexBuilder::new();
        builder.extend(entries)?;
        Ok(builder.finish())
    }

    /// All entries in key order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by category and raw identifier.
    pub fn get(&self, category: SymbolCategory, id: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.category == category && entry.id == id)
    }

    /// Iterate over every entry whose key starts with `query`, in key order.
    ///
    /// The scan is lazy: callers that stop pulling stop the lookup.
    pub fn prefix_scan<'a>(&'a self, query: &'a QueryToken) -> PrefixScan<'a> {
        let prefix = query.as_str();
        let start = if self.entries.len() <= LINEAR_SCAN_THRESHOLD {
            self.entries
                .iter()
                .position(|entry| entry.key.as_str() >= prefix)
                .unwrap_or(self.entries.len())
        } else {
            self.entries
                .partition_point(|entry| entry.key.as_str() < prefix)
        };
        PrefixScan {
            rest: &self.entries[start..],
            prefix,
        }
    }
}

/// Lazy iterator over the entries matching a prefix.
#[derive(Debug, Clone)]
pub struct PrefixScan<'a> {
    rest: &'a [Entry],
    prefix: &'a str,
}

impl<'a> Iterator for PrefixScan<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.rest.split_first()?;
        if first.key.starts_with(self.prefix) {
            self.rest = rest;
            Some(first)
        } else {
            self.rest = &[];
            None
        }
    }
}

/// Accumulates payload tables and produces a [`SymbolIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: Vec<Entry>,
    seen: HashSet<(SymbolCategory, String)>,
}

impl IndexBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one validated table. Fails without adding anything when a raw identifier repeats
    /// within its category or an entry has no occurrences.
    pub fn extend(&mut self, entries: Vec<Entry>) -> Result<&mut Self> {
        let mut batch = HashSet::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.occurrences.is_empty() {
                return Err(SymdexError::malformed(position, "entry has no occurrences"));
            }
            let primary = (entry.category, entry.id.clone());
            if self.seen.contains(&primary) || !batch.insert(primary) {
                return Err(SymdexError::malformed(
                    position,
                    format!("duplicate key {:?}", entry.id),
                ));
            }
        }
        self.seen.extend(batch);
        self.entries.extend(entries);
        Ok(self)
    }

    /// Sort the accumulated entries and freeze them into an index.
    pub fn finish(self) -> SymbolIndex {
        let mut entries = self.entries;
        // Stable: equal keys keep their load order.
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        let categories = entries
            .iter()
            .fold(SymbolCategory::empty(), |acc, entry| acc | entry.category);
        info!(
            "Built symbol index with {} entries ({})",
            entries.len(),
            describe_categories(categories).join(", ")
        );

        SymbolIndex { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, key: &str, category: SymbolCategory) -> Entry {
        Entry {
            id: id.to_string(),
            key: key.to_string(),
            ordinal: None,
            label: key.to_string(),
            category,
            occurrences: vec![Occurrence {
                reference: format!("{id}.html"),
                scope_label: "Scope".to_string(),
                opens_in_parent: true,
            }],
        }
    }

    fn keys(scan: PrefixScan<'_>) -> Vec<String> {
        scan.map(|entry| entry.key.clone()).collect()
    }

    fn index_of(keys: &[&str]) -> SymbolIndex {
        let entries = keys
            .iter()
            .map(|key| entry(key, key, SymbolCategory::FUNCTIONS))
            .collect();
        SymbolIndex::from_entries(entries).unwrap()
    }

    #[test]
    fn scan_returns_prefix_range_in_key_order() {
        let index = index_of(&["getdouble", "gcd", "getb", "go", "getdate", "getboolean"]);
        let query = normalize("get").unwrap();
        assert_eq!(
            keys(index.prefix_scan(&query)),
            vec!["getb", "getboolean", "getdate", "getdouble"]
        );
    }

    #[test]
    fn scan_without_match_is_empty() {
        let index = index_of(&["getb", "go"]);
        let query = normalize("zzz").unwrap();
        assert!(index.prefix_scan(&query).next().is_none());
        let query = normalize("a").unwrap();
        assert!(index.prefix_scan(&query).next().is_none());
    }

    #[test]
    fn binary_and_linear_paths_agree() {
        let names: Vec<String> = (0..200).map(|i| format!("sym{i:03}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let large = index_of(&refs);
        let small = index_of(&refs[..LINEAR_SCAN_THRESHOLD]);
        assert!(large.len() > LINEAR_SCAN_THRESHOLD);

        let query = normalize("sym01").unwrap();
        assert_eq!(keys(large.prefix_scan(&query)).len(), 10);
        assert_eq!(
            keys(small.prefix_scan(&query)),
            keys(large.prefix_scan(&query))
        );
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let entries = vec![
            entry("get_2", "get", SymbolCategory::FUNCTIONS),
            entry("gadget_1", "gadget", SymbolCategory::CLASSES),
            entry("get_1", "get", SymbolCategory::VARIABLES),
        ];
        let index = SymbolIndex::from_entries(entries).unwrap();
        let query = normalize("get").unwrap();
        let ids: Vec<&str> = index
            .prefix_scan(&query)
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(ids, vec!["get_2", "get_1"]);
    }

    #[test]
    fn duplicate_ids_are_rejected_per_category() {
        let mut builder = IndexBuilder::new();
        builder
            .extend(vec![entry("get_1", "get", SymbolCategory::FUNCTIONS)])
            .unwrap();
        assert!(
            builder
                .extend(vec![entry("get_1", "get", SymbolCategory::CLASSES)])
                .is_ok()
        );
        let err = builder
            .extend(vec![entry("get_1", "get", SymbolCategory::FUNCTIONS)])
            .unwrap_err();
        assert!(matches!(err, SymdexError::MalformedIndex { entry: 0, .. }));
        assert_eq!(builder.finish().len(), 2);
    }

    #[test]
    fn empty_occurrences_are_rejected() {
        let mut bad = entry("x_1", "x", SymbolCategory::SYMBOLS);
        bad.occurrences.clear();
        assert!(matches!(
            SymbolIndex::from_entries(vec![bad]),
            Err(SymdexError::MalformedIndex { .. })
        ));
    }

    #[test]
    fn get_uses_primary_key() {
        let index = index_of(&["getb", "go"]);
        assert_eq!(
            index.get(SymbolCategory::FUNCTIONS, "go").map(|e| e.key.as_str()),
            Some("go")
        );
        assert!(index.get(SymbolCategory::CLASSES, "go").is_none());
    }
}
