//! Runtime configuration

use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "scorecard";
const DB_FILE: &str = "scorecard.db";

/// Resolve the database path: explicit flag/env first, then the platform
/// data directory.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::data_dir().context("Could not determine the platform data directory; pass --db")?;
    Ok(base.join(APP_DIR).join(DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_db_path(Some(PathBuf::from("/tmp/x.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn default_path_ends_with_db_file() {
        if let Ok(path) = resolve_db_path(None) {
            assert!(path.ends_with("scorecard/scorecard.db"));
        }
    }
}
