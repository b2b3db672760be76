//! Named storage slots and their SQLite implementation.
//!
//! # Responsibility
//! - Provide `load(slot)` / `save(slot, value)` over opaque serialized blobs.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A slot holds at most one value; `save` replaces it entirely.
//! - `load` of a never-written slot returns `Ok(None)`, not an error.
//! - The store never interprets blob contents.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for slot reads/writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// In-memory state could not be serialized for storage.
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "cannot serialize slot value: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// The two named blobs the core persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// JSON array of recipes.
    Recipes,
    /// JSON object mapping recipe id to sold count.
    Counts,
}

impl Slot {
    /// Storage key; versioned so a future shape change can use a new key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Recipes => "cafe_recipes_v1",
            Self::Counts => "cafe_counts_v1",
        }
    }
}

/// Key-value persistence contract used by the inventory service.
pub trait SlotStore {
    fn load(&self, slot: Slot) -> RepoResult<Option<String>>;
    fn save(&self, slot: Slot, value: &str) -> RepoResult<()>;
}

/// SQLite-backed slot store.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn load(&self, slot: Slot) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [slot.key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, slot: Slot, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![slot.key(), value],
        )?;
        Ok(())
    }
}
