//! Local key-value storage for the item list and the category list.
//!
//! Each key holds one JSON document that is overwritten wholesale on every save.

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::InventoryResult;

pub const ITEMS_KEY: &str = "items";
pub const CATEGORIES_KEY: &str = "categories";

/// A store of named text blobs
pub trait BlobStore {
    fn load(&self, key: &str) -> InventoryResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> InventoryResult<()>;
}

/// Blob store in a single-table SQLite database
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Opens (or creates) the database at `path` and initialises the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> InventoryResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        log::info!("Inventory DB: {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> InventoryResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> InventoryResult<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Creates the `blobs` table if it does not already exist.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS blobs (
            key        TEXT NOT NULL PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

impl BlobStore for SqliteBlobStore {
    fn load(&self, key: &str) -> InventoryResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> InventoryResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value      = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        log::debug!("Saved blob {:?} ({} bytes)", key, value.len());
        Ok(())
    }
}

/// In-process blob store; contents are lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn with_blob(mut self, key: &str, value: &str) -> Self {
        self.blobs.insert(key.to_string(), value.to_string());
        self
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> InventoryResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> InventoryResult<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the path to the inventory database file.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inventory_manager")
        .join("inventory.db")
}
