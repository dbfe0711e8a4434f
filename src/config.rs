//! Configuration: data directory and database path resolution.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// The per-user huddle data directory (`~/.huddle`).
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".huddle"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. Explicit path from the `--db` flag (or `HUDDLE_DB`, which clap
///    maps onto the same flag)
/// 2. Default location: `~/.huddle/huddle.db`
///
/// # Errors
///
/// Returns a configuration error if no home directory can be found.
pub fn resolve_db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    data_dir()
        .map(|dir| dir.join("huddle.db"))
        .ok_or_else(|| Error::Config("could not determine a home directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/custom/path/huddle.db");
        let result = resolve_db_path(Some(&explicit)).unwrap();
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_default_is_under_home() {
        let path = resolve_db_path(None).unwrap();
        assert!(path.ends_with("huddle.db"));
        assert!(path.to_string_lossy().contains(".huddle"));
    }
}
