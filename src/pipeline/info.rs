// src/pipeline/info.rs

use std::path::Path;

use crate::error::Result;
use crate::storage::{SnapshotStore, SqliteStore};

/// Report whether a snapshot exists at `db_path` and how many rows it holds.
///
/// Returns `None` when there is no database file or no `prices` table.
pub fn run_info(db_path: &Path) -> Result<Option<u64>> {
    log::info!("Database: {}", db_path.display());

    if !db_path.exists() {
        log::info!("No snapshot found yet.");
        return Ok(None);
    }

    let store = SqliteStore::open(db_path)?;
    let count = store.row_count()?;
    match count {
        Some(rows) => log::info!("Snapshot rows: {}", rows),
        None => log::info!("No snapshot found yet."),
    }

    Ok(count)
}
