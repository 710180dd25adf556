//! Query and key normalization.
//!
//! Raw input and index keys pass through the same function, so a normalized query is a
//! prefix of a normalized key exactly when the user typed the start of that symbol name.

use std::fmt;

use serde_json::Value;

/// Separator used when collapsing whitespace runs.
const SEPARATOR: char = ' ';

/// A non-empty, normalized query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryToken(String);

impl QueryToken {
    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `self` is a prefix of `other`, i.e. `other` narrows this query.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QueryToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier punctuation that survives normalization.
fn is_identifier_punct(c: char) -> bool {
    matches!(c, '_' | ':' | '.')
}

/// Normalize arbitrary text into its lookup form.
///
/// Lowercases, drops characters that are neither alphanumeric, whitespace, nor `_ : .`,
/// collapses whitespace runs into a single space and trims both ends. The result may be
/// empty.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_separator = !out.is_empty();
            continue;
        }
        if !(c.is_alphanumeric() || is_identifier_punct(c)) {
            continue;
        }
        if pending_separator {
            out.push(SEPARATOR);
            pending_separator = false;
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Normalize raw user input. Returns `None` when nothing searchable remains.
pub fn normalize(raw: &str) -> Option<QueryToken> {
    let text = normalize_text(raw);
    if text.is_empty() {
        None
    } else {
        Some(QueryToken(text))
    }
}

/// Normalize loosely typed input; anything but a JSON string is treated as no query.
pub fn normalize_value(raw: &Value) -> Option<QueryToken> {
    raw.as_str().and_then(normalize)
}
