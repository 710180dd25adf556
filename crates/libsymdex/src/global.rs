//! Process-wide index, installed once and read everywhere.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::{
    error::{Result, SymdexError},
    index::SymbolIndex,
};

/// The installed index. Written exactly once.
static GLOBAL_INDEX: OnceCell<Arc<SymbolIndex>> = OnceCell::new();

/// Install `index` as the process-wide index.
///
/// Fails with [`SymdexError::AlreadyInitialized`] if an index is already installed; the
/// installed index is never replaced.
pub fn init_global(index: SymbolIndex) -> Result<Arc<SymbolIndex>> {
    let mut installed = false;
    let shared = GLOBAL_INDEX.get_or_init(|| {
        installed = true;
        Arc::new(index)
    });
    if !installed {
        return Err(SymdexError::AlreadyInitialized);
    }
    info!("Installed global symbol index ({} entries)", shared.len());
    Ok(Arc::clone(shared))
}

/// The process-wide index, if one has been installed.
pub fn global() -> Option<Arc<SymbolIndex>> {
    GLOBAL_INDEX.get().cloned()
}
