//! Loading index payloads from disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    category::SymbolCategory,
    doxygen::{category_for_file, parse_table},
    error::{Result, SymdexError},
    index::{IndexBuilder, SymbolIndex},
    payload::{KeyEncoding, parse_payload},
};

/// Load an index from a JSON payload, a Doxygen table script, or a Doxygen `search/`
/// directory.
///
/// Any malformed table aborts the load; a partially built index is never returned.
pub fn load_path(path: impl AsRef<Path>) -> Result<SymbolIndex> {
    let path = path.as_ref();
    let mut builder = IndexBuilder::new();
    if path.is_dir() {
        load_directory(&mut builder, path)?;
    } else {
        load_file(&mut builder, path)?;
    }
    Ok(builder.finish())
}

/// Build an index from an in-memory JSON payload of uncategorized entries.
pub fn load_json_str(json: &str) -> Result<SymbolIndex> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let entries = parse_payload(&value, KeyEncoding::Plain, SymbolCategory::SYMBOLS)?;
    SymbolIndex::from_entries(entries)
}

fn load_file(builder: &mut IndexBuilder, path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let content = fs::read_to_string(path)?;
            let value: serde_json::Value = serde_json::from_str(&content)?;
            builder.extend(parse_payload(
                &value,
                KeyEncoding::Plain,
                SymbolCategory::SYMBOLS,
            )?)?;
        }
        Some("js") => {
            let category = category_for_file(path)
                .ok_or_else(|| SymdexError::UnsupportedSource(path.to_path_buf()))?;
            let content = fs::read_to_string(path)?;
            builder.extend(parse_table(&content, category)?)?;
        }
        _ => return Err(SymdexError::UnsupportedSource(path.to_path_buf())),
    }
    debug!("Loaded index table {}", path.display());
    Ok(())
}

fn load_directory(builder: &mut IndexBuilder, dir: &Path) -> Result<()> {
    let mut tables: Vec<(PathBuf, SymbolCategory)> = Vec::new();
    for dir_entry in fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if path.extension().is_none_or(|ext| ext != "js") {
            continue;
        }
        match category_for_file(&path) {
            // The combined tables repeat every categorized symbol.
            Some(category) if category == SymbolCategory::SYMBOLS => {
                debug!("Skipping combined table {}", path.display());
            }
            Some(category) => tables.push((path, category)),
            None => warn!("Skipping unrecognized search script {}", path.display()),
        }
    }
    if tables.is_empty() {
        return Err(SymdexError::UnsupportedSource(dir.to_path_buf()));
    }
    // Directory iteration order is unspecified; keep loads reproducible.
    tables.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, category) in tables {
        let content = fs::read_to_string(&path)?;
        builder.extend(parse_table(&content, category)?)?;
        debug!("Loaded index table {}", path.display());
    }
    Ok(())
}
