//! Ordering and display grouping of matched entries.

use std::cmp::Ordering;

use crate::{index::Entry, normalize::QueryToken};

/// Presentation clustering applied to a ranked result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    /// One unlabelled group holding every result.
    None,
    /// Cluster by the scope label of each entry's first occurrence.
    #[default]
    Scope,
    /// Cluster by symbol category.
    Category,
}

impl GroupBy {
    /// Parse a CLI spelling: `scope`, `category` or `none`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "scope" => Some(Self::Scope),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    /// Label of the group `entry` falls into.
    pub fn group_label(self, entry: &Entry) -> &str {
        match self {
            Self::None => "",
            Self::Scope => entry
                .occurrences
                .first()
                .map_or("", |occurrence| occurrence.scope_label.as_str()),
            Self::Category => entry.category.label(),
        }
    }
}

/// Compare two matched entries for display order.
///
/// An exact match with the query comes first. When one key is a prefix of the other the
/// shorter key wins; otherwise keys compare lexicographically. Equal keys compare equal so
/// a stable sort keeps their load order.
pub fn compare(query: &QueryToken, a: &Entry, b: &Entry) -> Ordering {
    let exact_a = a.key == query.as_str();
    let exact_b = b.key == query.as_str();
    exact_b.cmp(&exact_a).then_with(|| {
        if a.key.starts_with(b.key.as_str()) || b.key.starts_with(a.key.as_str()) {
            a.key.len().cmp(&b.key.len())
        } else {
            a.key.cmp(&b.key)
        }
    })
}

/// Sort matched entries into display order. Occurrences are left untouched.
pub fn rank(query: &QueryToken, entries: &mut [&Entry]) {
    entries.sort_by(|a, b| compare(query, a, b));
}

/// Cluster ranked entries for display.
///
/// Groups appear in the order of their best-ranked entry and keep rank order inside.
pub fn group<'a>(entries: &[&'a Entry], group_by: GroupBy) -> Vec<(String, Vec<&'a Entry>)> {
    let mut groups: Vec<(String, Vec<&'a Entry>)> = Vec::new();
    for &entry in entries {
        let label = group_by.group_label(entry);
        match groups.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, members)) => members.push(entry),
            None => groups.push((label.to_string(), vec![entry])),
        }
    }
    groups
}
