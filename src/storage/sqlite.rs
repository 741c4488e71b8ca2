//! SQLite snapshot store.
//!
//! The `prices` table is a disposable view of the latest snapshot: it is
//! dropped and recreated on every build and has no keys or indexes.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::error::Result;
use crate::models::PriceRow;
use crate::storage::SnapshotStore;

const SQL_DROP_TABLE: &str = "DROP TABLE IF EXISTS prices";

const SQL_CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS prices (
    family TEXT,
    type TEXT,
    size TEXT,
    burst TEXT,
    base REAL,
    processor TEXT,
    bit TEXT,
    arch TEXT,
    tenancy TEXT,
    region TEXT,
    vcpu INT,
    memory REAL,
    storage TEXT,
    os TEXT,
    norm REAL,
    speed TEXT,
    actual TEXT,
    network TEXT,
    gen TEXT,
    cur TEXT,
    hourly REAL,
    monthly REAL,
    starting TEXT
)";

const SQL_INSERT: &str = "
INSERT INTO prices (
    family, type, size, burst, base,
    processor, bit, arch, tenancy, region,
    vcpu, memory, storage, os, norm,
    speed, actual, network, gen, cur,
    hourly, monthly, starting
) VALUES (
    ?1, ?2, ?3, ?4, ?5,
    ?6, ?7, ?8, ?9, ?10,
    ?11, ?12, ?13, ?14, ?15,
    ?16, ?17, ?18, ?19, ?20,
    ?21, ?22, ?23
)";

/// Snapshot store owning a single SQLite connection.
///
/// The connection is closed when the store is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wrap an already opened connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self::new(conn))
    }

    /// Borrow the underlying connection, e.g. for ad-hoc reads.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SnapshotStore for SqliteStore {
    fn reinitialize(&mut self) -> Result<()> {
        log::debug!("Recreating prices table");
        self.conn.execute(SQL_DROP_TABLE, [])?;
        self.conn.execute(SQL_CREATE_TABLE, [])?;
        Ok(())
    }

    fn insert_all(&mut self, rows: &[PriceRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(SQL_INSERT)?;
            for row in rows {
                stmt.execute(params![
                    row.family,
                    row.instance_type,
                    row.size,
                    row.burst_label(),
                    row.base,
                    row.processor,
                    row.bit,
                    row.arch.as_str(),
                    row.tenancy,
                    row.region,
                    row.vcpu,
                    row.memory,
                    row.storage,
                    row.os,
                    row.norm,
                    row.speed,
                    row.actual,
                    row.network,
                    row.generation,
                    row.cur,
                    row.hourly,
                    row.monthly,
                    row.starting,
                ])?;
            }
        }
        tx.commit()?;

        log::debug!("Committed {} rows", rows.len());
        Ok(rows.len())
    }

    fn row_count(&self) -> Result<Option<u64>> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'prices')",
            [],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(None);
        }

        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM prices", [], |row| row.get(0))?;
        Ok(Some(count.max(0) as u64))
    }
}
