//! Slot table schema, stamped with `PRAGMA user_version`.
//!
//! There is one schema version. A fresh database (version 0) gets the
//! `slots` table and is stamped; a database at the current version is
//! used as-is; anything newer was written by a later build and is refused.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version this build reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

const SLOTS_TABLE_SQL: &str = include_str!("slots.sql");

/// Brings `conn` to `SCHEMA_VERSION` or reports why it cannot.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    let found = stored_version(conn)?;
    match found {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(SLOTS_TABLE_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            info!("event=db_schema module=db status=ok action=create version={SCHEMA_VERSION}");
            Ok(())
        }
        newer => Err(DbError::UnsupportedSchemaVersion {
            db_version: newer,
            latest_supported: SCHEMA_VERSION,
        }),
    }
}

/// Reads the `user_version` stamp of `conn`.
pub fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
