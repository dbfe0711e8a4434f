//! Command implementations.

pub mod case;
pub mod clear;
pub mod completions;
pub mod session;
pub mod version;
pub mod vocab;

use crate::config;
use crate::error::{Error, Result};
use crate::storage::SqliteStore;
use crate::store::CaseStore;
use std::path::PathBuf;

/// Open the case store at the resolved database path.
pub(crate) fn open_store(db: Option<&PathBuf>) -> Result<CaseStore<SqliteStore>> {
    let path = config::resolve_db_path(db.map(PathBuf::as_path))?;
    let port = SqliteStore::open(&path)?;
    CaseStore::open(port)
}

/// Map a 1-based CLI index (as shown by `case list`) to a 0-based
/// store position.
pub(crate) fn position(index: usize) -> Result<usize> {
    if index == 0 {
        return Err(Error::InvalidArgument(
            "indices are 1-based, as shown in the `#` column of `huddle case list`".to_string(),
        ));
    }
    Ok(index - 1)
}
