use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Result, StoreError};
use crate::models::{FoodItem, FoodLogSummary, NewFoodItem};

/// Latest schema version this build knows how to read.
pub const SCHEMA_VERSION: i64 = 1;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            StoreError::unavailable(format!(
                "failed to open database {}: {e}",
                path.display()
            ))
        })?;
        let db = Database { conn };
        db.ensure_schema_or_unavailable()?;
        info!("event=db_open mode=file path={}", path.display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::unavailable(format!("failed to open database: {e}")))?;
        let db = Database { conn };
        db.ensure_schema_or_unavailable()?;
        info!("event=db_open mode=memory");
        Ok(db)
    }

    /// Close the connection, surfacing any error from finalizing it.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::from(e))
    }

    pub(crate) fn ensure_schema_or_unavailable(&self) -> Result<()> {
        self.ensure_schema().map_err(|e| match e {
            StoreError::QueryFailure(err) => {
                StoreError::unavailable(format!("failed to ensure schema: {err}"))
            }
            other => other,
        })
    }

    /// Create the `food_items` table when missing. Safe to call on every open.
    pub fn ensure_schema(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version > SCHEMA_VERSION {
            return Err(StoreError::unavailable(format!(
                "database schema version {version} is newer than supported {SCHEMA_VERSION}"
            )));
        }

        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS food_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                calories INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
            );",
        )?;

        if version < SCHEMA_VERSION {
            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)?;
            debug!("event=schema_upgrade from={version} to={SCHEMA_VERSION}");
        }

        Ok(())
    }

    fn item_from_row(row: &rusqlite::Row) -> rusqlite::Result<FoodItem> {
        Ok(FoodItem {
            id: row.get(0)?,
            name: row.get(1)?,
            calories: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    // --- Food items ---

    /// Insert an item and return its new id.
    ///
    /// `created_at` never moves backwards relative to the newest stored row,
    /// even if the wall clock does.
    pub fn insert_item(&self, item: &NewFoodItem) -> Result<i64> {
        let latest: Option<DateTime<Utc>> =
            self.conn
                .query_row("SELECT MAX(created_at) FROM food_items", [], |row| {
                    row.get(0)
                })?;
        let now = Utc::now();
        let created_at = latest.map_or(now, |latest| latest.max(now));

        self.conn.execute(
            "INSERT INTO food_items (name, calories, created_at) VALUES (?1, ?2, ?3)",
            params![item.name, item.calories, created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=item_insert id={id} calories={}", item.calories);
        Ok(id)
    }

    pub fn get_all_items(&self) -> Result<Vec<FoodItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, calories, created_at FROM food_items
             ORDER BY created_at DESC, id DESC",
        )?;
        let items = stmt
            .query_map([], Self::item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    pub fn get_item_by_id(&self, id: i64) -> Result<Option<FoodItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, name, calories, created_at FROM food_items WHERE id = ?1",
                params![id],
                Self::item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    /// Overwrite name and calories. Returns `false` when no row has `id`.
    pub fn update_item(&self, id: i64, item: &NewFoodItem) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE food_items SET name = ?1, calories = ?2 WHERE id = ?3",
            params![item.name, item.calories, id],
        )?;
        debug!("event=item_update id={id} matched={}", rows > 0);
        Ok(rows > 0)
    }

    pub fn delete_item(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM food_items WHERE id = ?1", params![id])?;
        debug!("event=item_delete id={id} matched={}", rows > 0);
        Ok(rows > 0)
    }

    pub fn delete_all_items(&self) -> Result<usize> {
        let rows = self.conn.execute("DELETE FROM food_items", [])?;
        debug!("event=item_delete_all rows={rows}");
        Ok(rows)
    }

    pub fn total_calories(&self) -> Result<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(calories), 0) FROM food_items",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn count_items(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM food_items", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn build_summary(&self) -> Result<FoodLogSummary> {
        Ok(FoodLogSummary {
            item_count: self.count_items()?,
            total_calories: self.total_calories()?,
        })
    }
}
