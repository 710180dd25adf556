use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or installing a symbol index.
///
/// Queries never fail: once an index is built, every lookup path is infallible.
#[derive(Error, Debug)]
pub enum SymdexError {
    /// The payload failed structural validation. Nothing was loaded.
    #[error("Malformed index at entry {entry}: {reason}")]
    MalformedIndex {
        /// Zero-based position of the offending tuple in its payload table.
        entry: usize,
        /// Human-readable description of the failed check.
        reason: String,
    },

    /// Indicates a failure in reading a payload file.
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    /// The payload was not valid JSON (after any Doxygen conversion).
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The path is neither a JSON payload, a Doxygen table, nor a Doxygen search directory.
    #[error("Unsupported index source: {0}")]
    UnsupportedSource(PathBuf),

    /// The process-wide index was already installed.
    #[error("The global symbol index is already initialized")]
    AlreadyInitialized,
}

impl SymdexError {
    /// Build a [`SymdexError::MalformedIndex`] for the tuple at `entry`.
    pub(crate) fn malformed(entry: usize, reason: impl Into<String>) -> Self {
        Self::MalformedIndex {
            entry,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SymdexError>;
