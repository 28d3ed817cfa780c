//! `kv_store` schema steps.
//!
//! Step `n` (1-based) upgrades a store from schema version `n - 1` to `n`;
//! the applied version lives in `PRAGMA user_version`.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_STEPS: &[&str] = &[include_str!("0001_kv_store.sql")];

/// Schema version written by this build.
pub(super) fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

pub(super) fn stored_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the key-value table up to `latest_version()` in one transaction.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
pub(super) fn upgrade(conn: &mut Connection) -> StoreResult<()> {
    let stored = stored_version(conn)?;
    let latest = latest_version();
    if stored > latest {
        return Err(StoreError::UnsupportedSchemaVersion { stored, latest });
    }
    if stored == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, step) in SCHEMA_STEPS.iter().enumerate().skip(stored as usize) {
        tx.execute_batch(step)?;
        tx.pragma_update(None, "user_version", index as u32 + 1)?;
    }
    tx.commit()?;

    info!("event=store_upgrade module=store status=ok from={stored} to={latest}");
    Ok(())
}
