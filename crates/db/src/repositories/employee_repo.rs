//! Repository for the `employees` table.

use spasibka_core::types::{BitrixId, Coins};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::employee::{Employee, EmployeeListQuery, UpsertEmployee};

/// Column list for `employees` queries.
const COLUMNS: &str = "\
    id, bitrix_id, name, lastname, position, email, photo_url, \
    likes, coins, is_gamer, is_admin, created_at, updated_at";

/// Advisory lock key serializing roster sync runs.
const ROSTER_LOCK_KEY: i64 = 0x5350_4153_524f_5354;

/// Result of a roster upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Provides reads, locked balance mutations and roster upserts for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn find_by_bitrix_id<'e, E: PgExecutor<'e>>(
        executor: E,
        bitrix_id: BitrixId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE bitrix_id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(bitrix_id)
            .fetch_optional(executor)
            .await
    }

    /// List employees ordered by display name.
    pub async fn list(
        pool: &PgPool,
        params: &EmployeeListQuery,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees \
             WHERE ($1 = false OR is_gamer) \
             ORDER BY lastname, name, bitrix_id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(params.only_gamers)
            .bind(params.limit)
            .bind(params.offset.unwrap_or(0).max(0))
            .fetch_all(pool)
            .await
    }

    /// Lock the rows for every id in `bitrix_ids`, in ascending `bitrix_id`
    /// order. Missing ids are simply absent from the result.
    pub async fn lock_many(
        conn: &mut PgConnection,
        bitrix_ids: &[BitrixId],
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees \
             WHERE bitrix_id = ANY($1) \
             ORDER BY bitrix_id \
             FOR UPDATE"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(bitrix_ids)
            .fetch_all(conn)
            .await
    }

    pub async fn lock_one(
        conn: &mut PgConnection,
        bitrix_id: BitrixId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE bitrix_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Employee>(&query)
            .bind(bitrix_id)
            .fetch_optional(conn)
            .await
    }

    /// Add one received like and `coins` to the recipient. Row must be locked.
    pub async fn credit_reward(
        conn: &mut PgConnection,
        bitrix_id: BitrixId,
        coins: Coins,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE employees \
             SET likes = likes + 1, coins = coins + $2, updated_at = NOW() \
             WHERE bitrix_id = $1",
        )
        .bind(bitrix_id)
        .bind(coins)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Debit `amount` coins. Row must be locked and the balance pre-checked.
    pub async fn debit_coins(
        conn: &mut PgConnection,
        bitrix_id: BitrixId,
        amount: Coins,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE employees SET coins = coins - $2, updated_at = NOW() WHERE bitrix_id = $1",
        )
        .bind(bitrix_id)
        .bind(amount)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Write the admin-editable fields, returning the updated row.
    pub async fn update_admin_fields(
        conn: &mut PgConnection,
        employee: &Employee,
    ) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET \
                name = $2, lastname = $3, coins = $4, is_gamer = $5, is_admin = $6, \
                updated_at = NOW() \
             WHERE bitrix_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(employee.bitrix_id)
            .bind(&employee.name)
            .bind(&employee.lastname)
            .bind(employee.coins)
            .bind(employee.is_gamer)
            .bind(employee.is_admin)
            .fetch_one(conn)
            .await
    }

    /// Insert or refresh a roster entry by `bitrix_id`. Balances and flags of
    /// existing rows are left untouched.
    pub async fn upsert_from_roster(
        conn: &mut PgConnection,
        input: &UpsertEmployee,
        make_admin: bool,
    ) -> Result<UpsertOutcome, sqlx::Error> {
        let inserted: bool = sqlx::query_scalar(
            "INSERT INTO employees (bitrix_id, name, lastname, position, email, photo_url, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT ON CONSTRAINT uq_employees_bitrix_id DO UPDATE SET \
                name = EXCLUDED.name, \
                lastname = EXCLUDED.lastname, \
                position = EXCLUDED.position, \
                email = EXCLUDED.email, \
                photo_url = EXCLUDED.photo_url, \
                updated_at = NOW() \
             RETURNING (xmax = 0)",
        )
        .bind(input.bitrix_id)
        .bind(&input.name)
        .bind(&input.lastname)
        .bind(&input.position)
        .bind(&input.email)
        .bind(&input.photo_url)
        .bind(make_admin)
        .fetch_one(conn)
        .await?;
        Ok(if inserted {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        })
    }

    /// Take the transaction-scoped roster sync lock.
    pub async fn acquire_roster_lock(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ROSTER_LOCK_KEY)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(executor)
            .await
    }
}
