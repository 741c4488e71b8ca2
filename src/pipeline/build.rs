// src/pipeline/build.rs

//! Snapshot build pipeline.

use std::path::Path;

use chrono::Utc;
use serde_json::Value;

use crate::error::Result;
use crate::models::{PriceRow, RawProduct};
use crate::services::normalize;
use crate::storage::{SnapshotStore, read_dump};

/// Rebuild the snapshot in `store` from the dump at `dump_path`.
///
/// The table is recreated before the dump is read, so a failure later on
/// leaves an empty table. Any malformed record aborts the build before
/// anything is inserted. Returns the number of rows inserted.
pub async fn run_build(dump_path: &Path, store: &mut dyn SnapshotStore) -> Result<usize> {
    let start_time = Utc::now();

    store.reinitialize()?;

    let records = read_dump(dump_path).await?;
    log::info!(
        "Loaded {} records from {}",
        records.len(),
        dump_path.display()
    );

    let rows = normalize_all(records)?;
    log::info!("Extracted {} rows to insert", rows.len());

    let inserted = store.insert_all(&rows)?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Successfully inserted {} rows to database ({}ms)",
        inserted,
        elapsed.num_milliseconds()
    );

    Ok(inserted)
}

/// Normalize records in order, stopping at the first malformed one.
pub fn normalize_all(records: Vec<Value>) -> Result<Vec<PriceRow>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            RawProduct::from_value(value)
                .and_then(|product| normalize(&product))
                .inspect_err(|e| log::error!("Record #{index} rejected: {e}"))
        })
        .collect()
}
