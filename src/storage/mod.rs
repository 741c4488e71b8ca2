//! Storage for the pricing pipeline.
//!
//! - `dump`: the raw JSON array written by `download` and read by `build`
//! - `sqlite`: the relational snapshot built from the dump
//!
//! ## Snapshot Table
//!
//! ```text
//! prices (23 columns, no keys, no indexes)
//! ├── instance: family, type, size, burst, base, processor, bit, arch
//! ├── placement: tenancy, region
//! ├── capacity: vcpu, memory, storage, os, norm, speed, actual, network, gen
//! └── price: cur, hourly, monthly, starting
//! ```

pub mod dump;
pub mod sqlite;

use crate::error::Result;
use crate::models::PriceRow;

// Re-export for convenience
pub use dump::{read_dump, write_dump};
pub use sqlite::SqliteStore;

/// Trait for snapshot storage backends.
pub trait SnapshotStore {
    /// Drop the snapshot table if present and create it empty.
    ///
    /// Not transactional with [`SnapshotStore::insert_all`]: a failure
    /// after this call leaves an empty table behind, not the prior snapshot.
    fn reinitialize(&mut self) -> Result<()>;

    /// Insert all rows in one transaction; either every row lands or none.
    ///
    /// Returns the number of rows inserted.
    fn insert_all(&mut self, rows: &[PriceRow]) -> Result<usize>;

    /// Number of rows in the snapshot, or `None` if no snapshot exists.
    fn row_count(&self) -> Result<Option<u64>>;
}
