//! Tab Store for tabforge.
//!
//! Implements `TabStoreTrait` — persistence of the per-product tab document,
//! backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::StorageError;
use crate::types::tab::TabSet;

/// Trait defining tab persistence operations.
pub trait TabStoreTrait {
    /// Persists the full tab collection for a product, replacing whatever
    /// was stored before. Last writer wins.
    fn save_tabs(&mut self, product_id: i64, tabs: &TabSet) -> Result<(), StorageError>;
    /// Loads the tab collection for a product. Returns `Ok(None)` when the
    /// product has no stored tabs or the stored document is not readable.
    fn load_tabs(&self, product_id: i64) -> Result<Option<TabSet>, StorageError>;
    /// Removes the stored tab collection for a product, if any.
    fn delete_tabs(&mut self, product_id: i64) -> Result<(), StorageError>;
    fn has_tabs(&self, product_id: i64) -> Result<bool, StorageError>;
}

/// Tab store backed by a SQLite connection.
pub struct TabStore<'a> {
    conn: &'a Connection,
}

impl<'a> TabStore<'a> {
    /// Creates a new `TabStore` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl<'a> TabStoreTrait for TabStore<'a> {
    fn save_tabs(&mut self, product_id: i64, tabs: &TabSet) -> Result<(), StorageError> {
        let data = serde_json::to_string(&tabs.to_value())
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        let now = Self::now();

        self.conn
            .execute(
                "INSERT OR REPLACE INTO product_tabs (product_id, data, updated_at) VALUES (?1, ?2, ?3)",
                params![product_id, data, now],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Loads and validates the stored document. Stored rows that fail to
    /// parse, or that are not a JSON array, read as absent rather than as an
    /// error: readers always tolerate garbage left behind by older writers.
    fn load_tabs(&self, product_id: i64) -> Result<Option<TabSet>, StorageError> {
        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM product_tabs WHERE product_id = ?1",
                params![product_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        let raw = match data {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(_) => return Ok(None),
        };
        if !value.is_array() {
            return Ok(None);
        }

        Ok(Some(TabSet::from_value(&value)))
    }

    fn delete_tabs(&mut self, product_id: i64) -> Result<(), StorageError> {
        self.conn
            .execute(
                "DELETE FROM product_tabs WHERE product_id = ?1",
                params![product_id],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn has_tabs(&self, product_id: i64) -> Result<bool, StorageError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM product_tabs WHERE product_id = ?1",
                params![product_id],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }
}
