//! The inventory store: schema management and row-level operations.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::debug;

use larder_core::{ItemId, UsageLogId};
use larder_inventory::{ContactEmail, Item, ItemUsage, NewItem, NewUsage, UsageLog};

use crate::error::{StoreError, StoreResult};

/// Open (and create if missing) a SQLite database at the given URL.
///
/// Foreign keys are switched on for every connection; the `usage_logs ->
/// items` reference is a real constraint, not a convention.
pub async fn connect(url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// Open a fresh in-memory database on a single pooled connection.
///
/// One connection is the point: each SQLite `:memory:` connection is its own
/// database, so a wider pool would scatter rows. Used by tests and demos.
pub async fn connect_memory() -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// SQLite-backed store for items, usage logs, and the singleton contact.
///
/// ## Thread safety
///
/// Holds a SQLx connection pool (cheap to clone, Send + Sync). Conflicting
/// writes serialize on SQLite's own locking; multi-statement operations run
/// inside explicit transactions.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    pool: SqlitePool,
}

impl InventoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the three tables when they do not exist yet.
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                quantity_total INTEGER NOT NULL,
                unit TEXT NOT NULL,
                date_bought DATE NOT NULL,
                expiration_date DATE NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usage_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL REFERENCES items(id),
                quantity_used INTEGER NOT NULL,
                timestamp DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Singleton contact row: the CHECK pins the only legal primary key.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                email TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new item; returns the store-assigned id.
    pub async fn insert_item(&self, item: &NewItem) -> StoreResult<ItemId> {
        let result = sqlx::query(
            r#"
            INSERT INTO items (name, quantity_total, unit, date_bought, expiration_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.name)
        .bind(item.quantity_total)
        .bind(&item.unit)
        .bind(item.date_bought)
        .bind(item.expiration_date)
        .execute(&self.pool)
        .await?;

        let id = ItemId::from_raw(result.last_insert_rowid());
        debug!(item_id = %id, name = %item.name, "item inserted");
        Ok(id)
    }

    /// Every item with its aggregated usage, ordered by name ascending.
    ///
    /// Outer-join semantics: items without any usage logs appear with a used
    /// quantity of 0.
    pub async fn list_items_with_usage(&self) -> StoreResult<Vec<ItemUsage>> {
        let rows = sqlx::query(
            r#"
            SELECT
                i.id,
                i.name,
                i.quantity_total,
                i.unit,
                i.date_bought,
                i.expiration_date,
                COALESCE(SUM(ul.quantity_used), 0) AS used_quantity
            FROM items i
            LEFT JOIN usage_logs ul ON i.id = ul.item_id
            GROUP BY i.id
            ORDER BY i.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(ItemUsage {
                item: Item {
                    id: ItemId::from_raw(row.try_get::<i64, _>("id")?),
                    name: row.try_get("name")?,
                    quantity_total: row.try_get("quantity_total")?,
                    unit: row.try_get("unit")?,
                    date_bought: row.try_get::<NaiveDate, _>("date_bought")?,
                    expiration_date: row.try_get::<NaiveDate, _>("expiration_date")?,
                },
                used_quantity: row.try_get("used_quantity")?,
            });
        }
        Ok(out)
    }

    /// Delete an item and all of its usage logs in one transaction.
    ///
    /// Both deletes commit together or not at all; a missing item rolls the
    /// (no-op) log deletion back and reports not-found.
    pub async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM usage_logs WHERE item_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back.
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        debug!(item_id = %id, "item and usage logs deleted");
        Ok(())
    }

    /// Insert a usage log with a system-assigned timestamp; returns the
    /// stored row.
    ///
    /// The referenced item must exist; an unknown `item_id` is not-found.
    pub async fn insert_usage(&self, usage: &NewUsage) -> StoreResult<UsageLog> {
        let mut tx = self.pool.begin().await?;

        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE id = ?")
            .bind(usage.item_id.as_i64())
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            return Err(StoreError::NotFound);
        }

        let timestamp: DateTime<Utc> = Utc::now();
        let result =
            sqlx::query("INSERT INTO usage_logs (item_id, quantity_used, timestamp) VALUES (?, ?, ?)")
                .bind(usage.item_id.as_i64())
                .bind(usage.quantity_used)
                .bind(timestamp)
                .execute(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(UsageLog {
            id: UsageLogId::from_raw(result.last_insert_rowid()),
            item_id: usage.item_id,
            quantity_used: usage.quantity_used,
            timestamp,
        })
    }

    /// Number of usage logs referencing an item (0 for unknown ids).
    pub async fn count_usage_logs(&self, id: ItemId) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usage_logs WHERE item_id = ?")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Set or overwrite the singleton contact email.
    pub async fn upsert_contact(&self, email: &ContactEmail) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email) VALUES (1, ?)
            ON CONFLICT(id) DO UPDATE SET email = excluded.email
            "#,
        )
        .bind(email.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The configured contact email, if any.
    pub async fn get_contact(&self) -> StoreResult<Option<String>> {
        let email: Option<String> =
            sqlx::query_scalar("SELECT email FROM users WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(email)
    }
}
