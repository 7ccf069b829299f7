//! Repository for the `items` table.

use spasibka_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list for `items` queries.
const COLUMNS: &str = "id, name, description, price, stock, is_active, created_at, updated_at";

/// Provides CRUD operations and the locked stock decrement.
pub struct ItemRepo;

impl ItemRepo {
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Items that can be bought right now.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items WHERE is_active AND stock > 0 ORDER BY price, id"
        );
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// The full catalog, including inactive and sold-out items.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY id");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (name, description, price, stock, is_active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.stock)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Returns `None` when the item does not exist.
    /// A `Some(None)` description clears the column.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET \
                name = COALESCE($2, name), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                price = COALESCE($5, price), \
                stock = COALESCE($6, stock), \
                is_active = COALESCE($7, is_active), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .bind(input.price)
            .bind(input.stock)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Take one unit of stock. Row must be locked and `stock > 0` verified.
    pub async fn decrement_stock(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE items SET stock = stock - 1, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
