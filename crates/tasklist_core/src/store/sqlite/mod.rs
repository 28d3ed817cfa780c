//! SQLite-backed key-value store.
//!
//! # Invariants
//! - A store handle is only returned once its schema is current.
//! - Every open attempt emits one `store_open` start event and one outcome event.

mod schema;

use super::{KeyValueStore, StoreError, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Key-value store over the `kv_store` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Schema version this build reads and writes.
    pub fn latest_schema_version() -> u32 {
        schema::latest_version()
    }

    /// Opens (or creates) a store file and upgrades its schema.
    ///
    /// # Errors
    /// - `Sqlite` when the file cannot be opened or upgraded.
    /// - `UnsupportedSchemaVersion` when a newer build wrote the file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        Self::open_with("file", || Connection::open(path))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    /// Schema version recorded in the open file.
    pub fn schema_version(&self) -> StoreResult<u32> {
        schema::stored_version(&self.conn)
    }

    fn open_with(
        mode: &'static str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode={mode}");

        let result = connect()
            .map_err(StoreError::from)
            .and_then(|mut conn| -> StoreResult<Self> {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                schema::upgrade(&mut conn)?;
                Ok(Self { conn })
            });

        match &result {
            Ok(_) => info!(
                "event=store_open module=store status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
