use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};

use crate::db::Database;
use crate::error::{Result, StoreError};
use crate::models::{FoodItem, FoodLogSummary, NewFoodItem};

/// Where the backing store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private in-memory database. Its contents are lost on `close()`.
    InMemory,
}

/// Asynchronous persistence service over the food log.
///
/// Construct one per application and hand it to callers by reference. The
/// service starts uninitialized; every operation other than
/// [`initialize`](Self::initialize), [`close`](Self::close) and
/// [`is_open`](Self::is_open) fails with [`StoreError::StoreUnavailable`]
/// until the store is open.
///
/// Statements run on tokio's blocking pool. Calls are expected to be issued
/// sequentially; concurrent calls are not ordered relative to each other.
pub struct FoodLogService {
    location: StoreLocation,
    db: Arc<Mutex<Option<Database>>>,
}

impl FoodLogService {
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            db: Arc::new(Mutex::new(None)),
        }
    }

    pub fn new_in_memory() -> Self {
        Self::new(StoreLocation::InMemory)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Open the store and ensure the schema exists.
    ///
    /// Calling this while already open re-verifies the schema and keeps the
    /// existing connection and data.
    pub async fn initialize(&self) -> Result<()> {
        let slot = Arc::clone(&self.db);
        let location = self.location.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = lock(&slot)?;
            if let Some(db) = guard.as_ref() {
                let Err(e) = db.ensure_schema_or_unavailable() else {
                    return Ok(());
                };
                // A failed re-initialize leaves the service closed.
                if let Some(db) = guard.take() {
                    if let Err(close_err) = db.close() {
                        warn!("event=store_close status=error error={close_err}");
                    }
                }
                return Err(e);
            }
            let db = match &location {
                StoreLocation::File(path) => Database::open(path)?,
                StoreLocation::InMemory => Database::open_in_memory()?,
            };
            *guard = Some(db);
            Ok(())
        })
        .await?
        .inspect(|_| info!("event=store_init status=ok"))
        .inspect_err(|e| error!("event=store_init status=error error={e}"))
    }

    /// Release the connection. A no-op when the store is not open.
    pub async fn close(&self) -> Result<()> {
        let slot = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let db = lock(&slot)?.take();
            match db {
                Some(db) => db.close().inspect(|_| info!("event=store_close status=ok")),
                None => Ok(()),
            }
        })
        .await?
        .inspect_err(|e| error!("event=store_close status=error error={e}"))
    }

    pub fn is_open(&self) -> bool {
        lock(&self.db).is_ok_and(|guard| guard.is_some())
    }

    /// Validate and insert an item, returning the new id.
    pub async fn add_item(&self, name: &str, calories: i64) -> Result<i64> {
        let name = name.to_string();
        self.with_db("add_item", move |db| {
            let item = NewFoodItem::new(&name, calories)?;
            db.insert_item(&item)
        })
        .await
    }

    /// All items, most recently added first.
    pub async fn get_all_items(&self) -> Result<Vec<FoodItem>> {
        self.with_db("get_all_items", Database::get_all_items).await
    }

    pub async fn get_item_by_id(&self, id: i64) -> Result<Option<FoodItem>> {
        self.with_db("get_item_by_id", move |db| db.get_item_by_id(id)).await
    }

    /// Overwrite name and calories of an existing item, keeping `created_at`.
    ///
    /// Returns `false` when no item has `id`; nothing is written in that case.
    pub async fn update_item(&self, id: i64, name: &str, calories: i64) -> Result<bool> {
        let name = name.to_string();
        self.with_db("update_item", move |db| {
            let item = NewFoodItem::new(&name, calories)?;
            db.update_item(id, &item)
        })
        .await
    }

    /// Returns `false` when no item has `id`.
    pub async fn delete_item(&self, id: i64) -> Result<bool> {
        self.with_db("delete_item", move |db| db.delete_item(id)).await
    }

    /// Remove every item, returning how many were removed.
    pub async fn delete_all_items(&self) -> Result<usize> {
        self.with_db("delete_all_items", Database::delete_all_items).await
    }

    /// Sum of calories over all items; 0 when there are none.
    pub async fn get_total_calories(&self) -> Result<i64> {
        self.with_db("get_total_calories", Database::total_calories).await
    }

    pub async fn get_summary(&self) -> Result<FoodLogSummary> {
        self.with_db("get_summary", Database::build_summary).await
    }

    async fn with_db<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let slot = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = lock(&slot)?;
            let db = guard.as_ref().ok_or_else(|| {
                StoreError::unavailable(format!("{op} called while store is closed"))
            })?;
            f(db)
        })
        .await?
        .inspect_err(|e| error!("event={op} status=error error={e}"))
    }
}

fn lock(slot: &Mutex<Option<Database>>) -> Result<MutexGuard<'_, Option<Database>>> {
    slot.lock()
        .map_err(|_| StoreError::unavailable("store lock poisoned"))
}
