//! Symdex answers incremental symbol-name queries against generated API documentation.
//!
//! An index is loaded once from a pre-built table (a JSON payload or the `search/*.js`
//! tables Doxygen emits), validated eagerly, and frozen. Queries are normalized, matched by
//! key prefix with a binary search, ranked, capped and grouped for display:
//!
//! ```
//! use libsymdex::{SearchOptions, load_json_str};
//!
//! let index = load_json_str(
//!     r#"[["getb_1", ["getb", [["basicio.html#getb", "Exiv2::BasicIo"]]]]]"#,
//! )?;
//! let response = index.search("GetB", &SearchOptions::default());
//! assert_eq!(response.total, 1);
//! # Ok::<(), libsymdex::SymdexError>(())
//! ```
//!
//! Interactive front ends issue every keystroke through a [`QuerySession`], which makes sure
//! only the newest query's results are ever delivered.

/// Symbol categories and their labels.
mod category;
/// Doxygen table parsing.
pub mod doxygen;
/// Error types.
mod error;
/// Process-wide index.
mod global;
/// The sorted symbol table.
mod index;
/// Query normalization.
mod normalize;
/// Payload validation.
mod payload;
/// Ranking and grouping.
mod rank;
/// Plain text rendering of responses.
mod report;
/// Query execution and result shaping.
mod search;
/// Stale-query tracking.
mod session;
/// Loading payloads from disk.
mod source;

pub use crate::{
    category::{SymbolCategory, describe_categories},
    error::{Result, SymdexError},
    global::{global, init_global},
    index::{Entry, IndexBuilder, LINEAR_SCAN_THRESHOLD, Occurrence, PrefixScan, SymbolIndex},
    normalize::{QueryToken, normalize, normalize_text, normalize_value},
    payload::{KeyEncoding, parse_payload, split_ordinal},
    rank::{GroupBy, compare, group, rank},
    report::render_report,
    search::{
        DEFAULT_MAX_RESULTS, ResultEntry, ResultGroup, ResultOccurrence, SearchOptions,
        SearchResponse,
    },
    session::{CompletedQuery, PendingQuery, QuerySession},
    source::{load_json_str, load_path},
};
